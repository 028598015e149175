use esp_idf_svc::sys;

use vol_keys::PowerMonitor;

/// Power-state ordinal while the system is resuming from sleep
pub const POWER_SUSPENDED: u32 = 0;
/// Power-state ordinal once the system is running normally
pub const POWER_ACTIVE: u32 = 1;

/// Power state derived from the sleep wake-up cause
///
/// Reports [`POWER_SUSPENDED`] for the first query after the chip woke from
/// sleep, so a media hold that woke the board counts as a wake gesture.
/// Light-sleep wakes without a reset show up as long cycle gaps instead.
pub struct WakePower {
    resume_pending: bool,
}

impl WakePower {
    pub fn new() -> Self {
        let cause = unsafe { sys::esp_sleep_get_wakeup_cause() };
        let resume_pending = cause != sys::esp_sleep_source_t_ESP_SLEEP_WAKEUP_UNDEFINED;
        if resume_pending {
            log::info!("Woke from sleep (cause {})", cause);
        }
        Self { resume_pending }
    }
}

impl PowerMonitor for WakePower {
    fn state(&mut self) -> u32 {
        if core::mem::take(&mut self.resume_pending) {
            POWER_SUSPENDED
        } else {
            POWER_ACTIVE
        }
    }
}
