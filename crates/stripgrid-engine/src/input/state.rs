use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers};

/// Current keyboard state for the window.
///
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies `ev` to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered while unfocused.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                repeat,
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed if *repeat => frame.key_repeats.push(*key),
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            repeat,
        }
    }

    #[test]
    fn press_then_release() {
        let (mut s, mut f) = (InputState::default(), InputFrame::default());
        s.apply_event(&mut f, key(Key::M, KeyState::Pressed, false));
        assert!(s.key_down(Key::M));
        assert!(f.pressed(Key::M));

        s.apply_event(&mut f, key(Key::M, KeyState::Released, false));
        assert!(!s.key_down(Key::M));
        assert!(f.keys_released.contains(&Key::M));
        assert_eq!(f.events.len(), 2);
    }

    #[test]
    fn repeats_counted_separately() {
        let (mut s, mut f) = (InputState::default(), InputFrame::default());
        s.apply_event(&mut f, key(Key::ArrowUp, KeyState::Pressed, false));
        s.apply_event(&mut f, key(Key::ArrowUp, KeyState::Pressed, true));
        s.apply_event(&mut f, key(Key::ArrowUp, KeyState::Pressed, true));
        assert_eq!(f.triggered(Key::ArrowUp), 3);
        assert_eq!(f.triggered(Key::ArrowDown), 0);
    }

    #[test]
    fn held_key_not_pressed_again_next_frame() {
        let (mut s, mut f) = (InputState::default(), InputFrame::default());
        s.apply_event(&mut f, key(Key::Space, KeyState::Pressed, false));
        f.clear();
        s.apply_event(&mut f, key(Key::Space, KeyState::Pressed, false));
        assert!(!f.pressed(Key::Space));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let (mut s, mut f) = (InputState::default(), InputFrame::default());
        s.apply_event(&mut f, key(Key::A, KeyState::Pressed, false));
        s.apply_event(&mut f, InputEvent::Focused(false));
        assert!(s.keys_down.is_empty());
        assert!(!s.focused);
    }

    #[test]
    fn digit_values() {
        assert_eq!(Key::Digit3.digit(), Some(3));
        assert_eq!(Key::M.digit(), None);
    }
}
