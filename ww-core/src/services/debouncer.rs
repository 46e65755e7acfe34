use ww_common::{ButtonSample, InputEvent};

/// Edge-triggered joystick debouncer.
///
/// An event fires only on the tick where keys go from none held to some
/// held. Holding a key or chattering while held produces nothing more.
#[derive(Debug, Default)]
pub struct Debouncer {
    previous: bool,
    last: InputEvent,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            previous: false,
            last: InputEvent::None,
        }
    }

    /// Feed one raw sample. Returns `true` on a press edge, in which case
    /// [`Debouncer::last`] has been updated to the pressed direction.
    pub fn update(&mut self, sample: ButtonSample) -> bool {
        let detected = sample.any();
        let edge = detected && !self.previous;
        self.previous = detected;

        if edge {
            self.last = sample.direction();
        }
        edge
    }

    /// Last pressed direction; sticky across releases.
    pub fn last(&self) -> InputEvent {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(debouncer: &mut Debouncer, samples: &[InputEvent]) -> Vec<bool> {
        samples
            .iter()
            .map(|e| debouncer.update(ButtonSample::only(*e)))
            .collect()
    }

    #[test]
    fn test_single_edge_for_held_key() {
        let mut debouncer = Debouncer::new();
        let edges = feed(
            &mut debouncer,
            &[
                InputEvent::None,
                InputEvent::Left,
                InputEvent::Left,
                InputEvent::Left,
                InputEvent::None,
            ],
        );
        assert_eq!(edges, vec![false, true, false, false, false]);
        assert_eq!(debouncer.last(), InputEvent::Left);
    }

    #[test]
    fn test_direction_is_sticky() {
        let mut debouncer = Debouncer::new();
        feed(&mut debouncer, &[InputEvent::Up, InputEvent::None, InputEvent::None]);
        assert_eq!(debouncer.last(), InputEvent::Up);
    }

    #[test]
    fn test_key_change_while_held_is_ignored() {
        let mut debouncer = Debouncer::new();
        let edges = feed(&mut debouncer, &[InputEvent::Up, InputEvent::Left]);
        assert_eq!(edges, vec![true, false]);
        assert_eq!(debouncer.last(), InputEvent::Up);
    }

    #[test]
    fn test_release_then_press_fires_again() {
        let mut debouncer = Debouncer::new();
        let edges = feed(
            &mut debouncer,
            &[InputEvent::Right, InputEvent::None, InputEvent::Down],
        );
        assert_eq!(edges, vec![true, false, true]);
        assert_eq!(debouncer.last(), InputEvent::Down);
    }
}
