// Linux input key codes reported for headset buttons

pub const KEY_VOLUMEDOWN: u16 = 114; // Volume down
pub const KEY_VOLUMEUP: u16 = 115; // Volume up
pub const KEY_PLAYPAUSE: u16 = 164; // Play/pause toggle

// Input device identity
pub const BUS_HOST: u16 = 0x19;
pub const DEVICE_NAME: &str = "vol_keys";
pub const DEVICE_PHYS: &str = "vol_keys/input0";

/// Logical key forwarded to the event sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    VolumeUp,
    VolumeDown,
    PlayPause,
}

impl Key {
    /// Input subsystem key code for this key
    pub const fn code(self) -> u16 {
        match self {
            Key::VolumeUp => KEY_VOLUMEUP,
            Key::VolumeDown => KEY_VOLUMEDOWN,
            Key::PlayPause => KEY_PLAYPAUSE,
        }
    }
}

/// Keys advertised by the input device at registration
pub const KEY_TABLE: [Key; 3] = [Key::VolumeUp, Key::VolumeDown, Key::PlayPause];

/// Identity the event sink registers with the input subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    pub name: &'static str,
    pub phys: &'static str,
    pub bustype: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

pub const DEVICE_INFO: DeviceInfo = DeviceInfo {
    name: DEVICE_NAME,
    phys: DEVICE_PHYS,
    bustype: BUS_HOST,
    vendor: 0x0001,
    product: 0x0002,
    version: 0x0100,
};
