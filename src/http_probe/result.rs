use chrono::{DateTime, Utc};

/// One immutable outcome record per executed check slot.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub name: String,
    pub success: bool,
    pub details: String,
    pub duration: Option<f64>,
    pub http_status: Option<u16>,
    pub completed_at: DateTime<Utc>,
}

impl ProbeResult {
    pub fn passed(
        name: String,
        details: String,
        duration: Option<f64>,
        http_status: Option<u16>,
    ) -> Self {
        Self {
            name,
            success: true,
            details,
            duration,
            http_status,
            completed_at: Utc::now(),
        }
    }

    pub fn failed(
        name: String,
        details: String,
        duration: Option<f64>,
        http_status: Option<u16>,
    ) -> Self {
        Self {
            name,
            success: false,
            details,
            duration,
            http_status,
            completed_at: Utc::now(),
        }
    }
}
