pub mod types;
pub mod error;
pub mod config;

pub use types::*;
pub use error::{CommonError, CommonResult};
pub use config::{ApiConfig, DashboardConfig, FlakeviewConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(CHART_DATA_LIMIT, 50);
        assert_eq!(DATE_FORMAT, "%Y-%m-%d");
    }
}
