use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};

lazy_static::lazy_static! {
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "sabai_http_requests_total", "Total HTTP requests", &["method", "path", "status"]
    ).unwrap();
    pub static ref NEARBY_QUERIES_TOTAL: IntCounter = register_int_counter!(
        "sabai_nearby_queries_total", "Total nearby queries"
    ).unwrap();
    pub static ref NEARBY_DURATION: Histogram = register_histogram!(
        "sabai_nearby_duration_seconds", "Nearby query duration",
        vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0]
    ).unwrap();
    pub static ref SUBMISSIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "sabai_submissions_total", "Station submissions", &["mode", "status"]
    ).unwrap();
    pub static ref STORE_WRITES_TOTAL: IntCounter = register_int_counter!(
        "sabai_store_writes_total", "Writes of the station collection"
    ).unwrap();
}

pub fn init() {
    lazy_static::initialize(&HTTP_REQUESTS_TOTAL);
    lazy_static::initialize(&NEARBY_QUERIES_TOTAL);
    lazy_static::initialize(&NEARBY_DURATION);
    lazy_static::initialize(&SUBMISSIONS_TOTAL);
    lazy_static::initialize(&STORE_WRITES_TOTAL);
}
