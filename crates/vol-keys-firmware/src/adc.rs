use esp_idf_svc::sys::{self, esp, EspError};

use vol_keys::VoltageSource;

const ADC_WIDTH_BIT_12: u32 = 3;
const ADC_MAX_RAW: u32 = 4095;
// 0 dB attenuation covers roughly 0..950 mV, enough for the ladder bands
const ADC_ATTEN_DB_0: u32 = 0;
const FULL_SCALE_MV: u32 = 950;

/// Headset MIC/ladder line on ADC1 channel 4 (GPIO4)
pub const LADDER_CHANNEL: sys::adc_channel_t = sys::adc_channel_t_ADC_CHANNEL_4;

/// Raw conversion came back negative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcReadError {
    pub raw: i32,
}

/// One-shot ADC1 channel scaled to millivolts
pub struct EspAdc {
    channel: sys::adc_channel_t,
}

impl EspAdc {
    pub fn new(channel: sys::adc_channel_t) -> Result<Self, EspError> {
        unsafe {
            esp!(sys::adc1_config_width(ADC_WIDTH_BIT_12))?;
            esp!(sys::adc1_config_channel_atten(channel, ADC_ATTEN_DB_0))?;
        }
        log::info!("ADC1 channel {} configured for ladder sampling", channel);
        Ok(Self { channel })
    }
}

impl VoltageSource for EspAdc {
    type Error = AdcReadError;

    fn read_millivolts(&mut self) -> Result<u32, Self::Error> {
        let raw = unsafe { sys::adc1_get_raw(self.channel) };
        if raw < 0 {
            return Err(AdcReadError { raw });
        }
        Ok(raw_to_millivolts(raw as u32))
    }
}

fn raw_to_millivolts(raw: u32) -> u32 {
    raw.min(ADC_MAX_RAW) * FULL_SCALE_MV / ADC_MAX_RAW
}
