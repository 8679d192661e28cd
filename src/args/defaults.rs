pub(crate) const DEFAULT_USER_AGENT: &str = concat!("judgeload/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub(crate) const DEFAULT_SUBMIT_PATH: &str = "submissions";
pub(crate) const DEFAULT_STATUS_PATH: &str = "submissions";
pub(crate) const DEFAULT_TEST_INPUT: &str = "41\n";
pub(crate) const DEFAULT_CASE_WEIGHTS: &str = "success=0.70,tle=0.10,mle=0.10,compile_error=0.10";
pub(crate) const DEFAULT_REGISTER_USERNAME: &str = "judgeload";
