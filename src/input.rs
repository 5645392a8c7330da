use crate::game::Dir;
use winit::event::VirtualKeyCode;
use winit_input_helper::WinitInputHelper;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Arrow(Dir),
    Restart,
}

const BINDINGS: [(VirtualKeyCode, Key); 5] = [
    (VirtualKeyCode::Up, Key::Arrow(Dir::Up)),
    (VirtualKeyCode::Right, Key::Arrow(Dir::Right)),
    (VirtualKeyCode::Down, Key::Arrow(Dir::Down)),
    (VirtualKeyCode::Left, Key::Arrow(Dir::Left)),
    (VirtualKeyCode::R, Key::Restart),
];

pub fn key_for(code: VirtualKeyCode) -> Option<Key> {
    BINDINGS.iter().find(|(c, _)| *c == code).map(|&(_, k)| k)
}

/// Game keys pressed since the last input step, in binding order.
pub fn pressed_keys(input: &WinitInputHelper) -> Vec<Key> {
    BINDINGS
        .iter()
        .filter(|(code, _)| input.key_pressed(*code))
        .map(|&(_, key)| key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_map_to_directions() {
        assert_eq!(key_for(VirtualKeyCode::Up), Some(Key::Arrow(Dir::Up)));
        assert_eq!(key_for(VirtualKeyCode::Right), Some(Key::Arrow(Dir::Right)));
        assert_eq!(key_for(VirtualKeyCode::Down), Some(Key::Arrow(Dir::Down)));
        assert_eq!(key_for(VirtualKeyCode::Left), Some(Key::Arrow(Dir::Left)));
        assert_eq!(key_for(VirtualKeyCode::R), Some(Key::Restart));
    }

    #[test]
    fn other_keys_are_ignored() {
        for code in [VirtualKeyCode::W, VirtualKeyCode::Space, VirtualKeyCode::Escape] {
            assert_eq!(key_for(code), None);
        }
    }
}
