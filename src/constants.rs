/// Check name constants to ensure consistency across the codebase
/// These constants define the names used to select checks from the CLI

// Check names (used in CLI and reporting)
pub const LOGOUT_REDIRECT_CHECK: &str = "logout_redirect";
pub const COORDINATE_DETECTION_CHECK: &str = "coordinate_detection";

// Paths probed on the target application
pub const LOGOUT_PATH: &str = "/logout/";
pub const DASHBOARD_PATH: &str = "/dashboard/";

/// Redirect target a successful logout must point at
pub const LOGIN_PAGE_PATH: &str = "/api/account/login-page/";

/// CSV sample inspected when no file is given on the command line
pub const SAMPLE_CSV_PATH: &str = "sample_files/sample.csv";

// Accepted coordinate column names, highest priority first.
// Matching is exact and case-insensitive; list order decides ties.
pub const LATITUDE_CANDIDATES: &[&str] = &["lat", "latitude", "y", "y_coord", "ycoord"];
pub const LONGITUDE_CANDIDATES: &[&str] =
    &["lon", "long", "longitude", "lng", "x", "x_coord", "xcoord"];

/// Get all supported check names
pub fn get_supported_checks() -> Vec<&'static str> {
    vec![LOGOUT_REDIRECT_CHECK, COORDINATE_DETECTION_CHECK]
}
