use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use ww_common::*;

use super::find_by_name;

const JOYSTICK_NAME: &str = "Raspberry Pi Sense HAT Joystick";

const EV_KEY: u16 = 0x01;
const KEY_ENTER: u16 = 28;
const KEY_UP: u16 = 103;
const KEY_LEFT: u16 = 105;
const KEY_RIGHT: u16 = 106;
const KEY_DOWN: u16 = 108;

// struct input_event: timeval (two longs), u16 type, u16 code, i32 value
const TIMEVAL_SIZE: usize = 2 * size_of::<usize>();
const EVENT_SIZE: usize = TIMEVAL_SIZE + 8;

#[derive(Default)]
struct KeyState {
    held: ButtonSample,
    /// Keys pressed since the last sample, kept even if already released.
    latched: ButtonSample,
}

/// Sense HAT joystick read from its evdev node on a background thread.
pub struct EvdevJoystick {
    state: Arc<Mutex<KeyState>>,
}

impl EvdevJoystick {
    pub fn open() -> io::Result<Self> {
        let device = match std::env::var("WW_JOYSTICK_DEVICE") {
            Ok(dev) => PathBuf::from(dev),
            Err(_) => {
                let sys = find_by_name("/sys/class/input", "event", "device/name", JOYSTICK_NAME)?;
                let node = sys.file_name().unwrap_or_default();
                Path::new("/dev/input").join(node)
            }
        };
        info!("Sense HAT joystick: {}", device.display());
        let mut file = File::open(&device)?;

        let state = Arc::new(Mutex::new(KeyState::default()));
        let shared = state.clone();
        thread::spawn(move || {
            let mut event = [0u8; EVENT_SIZE];
            loop {
                if let Err(e) = file.read_exact(&mut event) {
                    error!("Joystick read failed: {}", e);
                    return;
                }
                let kind = u16::from_ne_bytes([event[TIMEVAL_SIZE], event[TIMEVAL_SIZE + 1]]);
                let code = u16::from_ne_bytes([event[TIMEVAL_SIZE + 2], event[TIMEVAL_SIZE + 3]]);
                let value = i32::from_ne_bytes([
                    event[TIMEVAL_SIZE + 4],
                    event[TIMEVAL_SIZE + 5],
                    event[TIMEVAL_SIZE + 6],
                    event[TIMEVAL_SIZE + 7],
                ]);
                if kind != EV_KEY {
                    continue;
                }
                let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
                apply_key(&mut state, code, value);
            }
        });

        Ok(Self { state })
    }
}

fn key_slot(sample: &mut ButtonSample, code: u16) -> Option<&mut bool> {
    match code {
        KEY_ENTER => Some(&mut sample.enter),
        KEY_UP => Some(&mut sample.up),
        KEY_LEFT => Some(&mut sample.left),
        KEY_RIGHT => Some(&mut sample.right),
        KEY_DOWN => Some(&mut sample.down),
        _ => None,
    }
}

fn apply_key(state: &mut KeyState, code: u16, value: i32) {
    // value: 0 release, 1 press, 2 autorepeat
    let pressed = value != 0;
    if let Some(held) = key_slot(&mut state.held, code) {
        *held = pressed;
    }
    if value == 1 {
        if let Some(latched) = key_slot(&mut state.latched, code) {
            *latched = true;
        }
    }
}

impl Joystick for EvdevJoystick {
    type Error = core::convert::Infallible;

    fn sample(&mut self) -> Result<ButtonSample, Self::Error> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let held = state.held;
        let latched = core::mem::take(&mut state.latched);
        Ok(ButtonSample {
            enter: held.enter || latched.enter,
            left: held.left || latched.left,
            right: held.right || latched.right,
            up: held.up || latched.up,
            down: held.down || latched.down,
        })
    }
}
