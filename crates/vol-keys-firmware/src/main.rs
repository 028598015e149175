mod adc;
mod power;
mod runtime_diagnostics;

use esp_idf_svc::hal::{
    gpio::{AnyInputPin, Input, InputPin, PinDriver, Pull},
    peripherals::Peripherals,
};

use vol_keys::{
    Builder, ChannelSink, Decoder, Interface, MonotonicClock, Scheduler, SinkEvent, DEVICE_INFO,
    KEY_TABLE,
};

use adc::{EspAdc, LADDER_CHANNEL};
use power::WakePower;
use runtime_diagnostics::{configure_pthread_defaults, log_heap};

/// Per-cycle decoder dump
const DEBUG: bool = false;

type DetectPin = PinDriver<'static, AnyInputPin, Input>;
type HeadsetBoard = Interface<EspAdc, DetectPin, DetectPin, WakePower>;

/// Open a jack detect input, or run without it if the pin is unusable
fn detect_input(pin: AnyInputPin, pull: Pull, label: &str) -> Option<DetectPin> {
    let mut driver = match PinDriver::input(pin) {
        Ok(driver) => driver,
        Err(err) => {
            log::warn!("{} detect unavailable: {}", label, err);
            return None;
        }
    };
    if let Err(err) = driver.set_pull(pull) {
        log::warn!("{} detect pull config failed: {}", label, err);
    }
    Some(driver)
}

fn log_device_registration() {
    log::info!(
        "Input device {} ({}) bus={:#x} vendor={:#06x} product={:#06x} version={:#06x}",
        DEVICE_INFO.name,
        DEVICE_INFO.phys,
        DEVICE_INFO.bustype,
        DEVICE_INFO.vendor,
        DEVICE_INFO.product,
        DEVICE_INFO.version
    );
    for key in KEY_TABLE {
        log::info!("  key {:?} -> code {}", key, key.code());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log_heap("startup");
    configure_pthread_defaults();

    let peripherals = Peripherals::take()?;

    let adc = EspAdc::new(LADDER_CHANNEL)?;
    // Headset detect reads high with a plug inserted; balance reads high when
    // the MIC line is shorted to ground by a 3-pole plug.
    let headset = detect_input(peripherals.pins.gpio5.downgrade_input(), Pull::Down, "Headset");
    let balance = detect_input(peripherals.pins.gpio6.downgrade_input(), Pull::Down, "Balance");

    let interface: HeadsetBoard = Interface::new(adc, headset, balance, WakePower::new());
    if !interface.is_gate_monitored() {
        log::warn!("No jack detect inputs; sampling unconditionally");
    }

    let config = Builder::new().debug(DEBUG).build()?;
    let (sink, events) = ChannelSink::new();
    let decoder: Decoder<_, _, _> = Decoder::new(interface, sink, MonotonicClock::new(), config);

    log_device_registration();
    let mut scheduler = Scheduler::new(decoder);
    scheduler.start()?;
    log_heap("after_start");

    // The worker owns the only sender, so this drains for as long as the
    // firmware runs. It only ends if the worker died and dropped its sink.
    for event in events.iter() {
        match event {
            SinkEvent::Key { key, pressed } => {
                log::info!("Key event: {:?} code={} pressed={}", key, key.code(), pressed)
            }
            SinkEvent::Sync => log::trace!("Key sync"),
        }
    }

    log::error!("Key event channel closed; collecting polling worker");
    scheduler.shutdown()?;
    Ok(())
}
