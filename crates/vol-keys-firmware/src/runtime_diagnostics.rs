use esp_idf_svc::hal::task::thread::ThreadSpawnConfiguration;
use esp_idf_svc::sys;

const POLL_WORKER_STACK_BYTES: usize = 8 * 1024;
const POLL_WORKER_PRIORITY: u8 = 5;

/// Log heap usage statistics and current task stack headroom.
pub fn log_heap(label: &str) {
    let free_heap = unsafe { sys::esp_get_free_heap_size() };
    let min_free = unsafe { sys::esp_get_minimum_free_heap_size() };
    let stack_hwm_words = unsafe { sys::uxTaskGetStackHighWaterMark(core::ptr::null_mut()) };
    let stack_hwm_bytes = (stack_hwm_words as usize) * core::mem::size_of::<sys::StackType_t>();
    log::info!(
        "[MEM] {}: free={} min_free={} stack_hwm={}B",
        label,
        free_heap,
        min_free,
        stack_hwm_bytes
    );
}

/// Configure pthread defaults used by the `std::thread` poll worker.
pub fn configure_pthread_defaults() {
    let mut config = ThreadSpawnConfiguration::default();
    config.stack_size = POLL_WORKER_STACK_BYTES;
    config.priority = POLL_WORKER_PRIORITY;
    config.inherit = false;

    if let Err(err) = config.set() {
        log::warn!("Failed to configure pthread defaults: {}", err);
    } else {
        log::info!(
            "Configured pthread defaults: stack_size={} priority={}",
            config.stack_size,
            config.priority
        );
    }
}
