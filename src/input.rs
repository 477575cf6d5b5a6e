//! Normalized keyboard input.
//!
//! [`parse_key`] translates a DOM `KeyboardEvent.code` string into a [`Key`]
//! through a direct mapping table built once on first use. Unrecognized
//! codes map to [`Key::None`], never to an error; hosts must tolerate
//! unmapped keys silently. Only the web host feeds this with strings, but
//! the mapper compiles on every target so the shared [`Key`] enum and its
//! table stay unit-testable.

use std::collections::HashMap;
use std::sync::OnceLock;

/// A normalized key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)] // the variants mirror the DOM code names one-to-one
pub enum Key {
    /// Sentinel for codes this mapper does not know.
    None,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12, F13,
    F14, F15, F16, F17, F18, F19, F20, F21, F22, F23, F24, F25,

    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadAdd, NumpadSubtract, NumpadMultiply, NumpadDivide,
    NumpadDecimal, NumpadEnter, NumpadEqual, NumLock,

    Up, Down, Left, Right,
    Home, End, PageUp, PageDown, Insert, Delete,

    Backspace, Tab, Enter, Escape, Space,
    CapsLock, ScrollLock, Pause, PrintScreen, Menu,

    AltLeft, AltRight, ControlLeft, ControlRight,
    ShiftLeft, ShiftRight, MetaLeft, MetaRight,

    Comma, Period, Semicolon, Quote, Backquote,
    BracketLeft, BracketRight, Backslash, Slash,
    Minus, Equal, Lang1, Lang2,
}

/// `KeyboardEvent.code` strings and the keys they normalize to.
const CODES: &[(&str, Key)] = &[
    ("KeyA", Key::A), ("KeyB", Key::B), ("KeyC", Key::C), ("KeyD", Key::D),
    ("KeyE", Key::E), ("KeyF", Key::F), ("KeyG", Key::G), ("KeyH", Key::H),
    ("KeyI", Key::I), ("KeyJ", Key::J), ("KeyK", Key::K), ("KeyL", Key::L),
    ("KeyM", Key::M), ("KeyN", Key::N), ("KeyO", Key::O), ("KeyP", Key::P),
    ("KeyQ", Key::Q), ("KeyR", Key::R), ("KeyS", Key::S), ("KeyT", Key::T),
    ("KeyU", Key::U), ("KeyV", Key::V), ("KeyW", Key::W), ("KeyX", Key::X),
    ("KeyY", Key::Y), ("KeyZ", Key::Z),
    ("Digit0", Key::Digit0), ("Digit1", Key::Digit1), ("Digit2", Key::Digit2),
    ("Digit3", Key::Digit3), ("Digit4", Key::Digit4), ("Digit5", Key::Digit5),
    ("Digit6", Key::Digit6), ("Digit7", Key::Digit7), ("Digit8", Key::Digit8),
    ("Digit9", Key::Digit9),
    ("F1", Key::F1), ("F2", Key::F2), ("F3", Key::F3), ("F4", Key::F4),
    ("F5", Key::F5), ("F6", Key::F6), ("F7", Key::F7), ("F8", Key::F8),
    ("F9", Key::F9), ("F10", Key::F10), ("F11", Key::F11), ("F12", Key::F12),
    ("F13", Key::F13), ("F14", Key::F14), ("F15", Key::F15), ("F16", Key::F16),
    ("F17", Key::F17), ("F18", Key::F18), ("F19", Key::F19), ("F20", Key::F20),
    ("F21", Key::F21), ("F22", Key::F22), ("F23", Key::F23), ("F24", Key::F24),
    ("F25", Key::F25),
    ("Numpad0", Key::Numpad0), ("Numpad1", Key::Numpad1), ("Numpad2", Key::Numpad2),
    ("Numpad3", Key::Numpad3), ("Numpad4", Key::Numpad4), ("Numpad5", Key::Numpad5),
    ("Numpad6", Key::Numpad6), ("Numpad7", Key::Numpad7), ("Numpad8", Key::Numpad8),
    ("Numpad9", Key::Numpad9),
    ("NumpadAdd", Key::NumpadAdd), ("NumpadSubtract", Key::NumpadSubtract),
    ("NumpadMultiply", Key::NumpadMultiply), ("NumpadDivide", Key::NumpadDivide),
    ("NumpadDecimal", Key::NumpadDecimal), ("NumpadEnter", Key::NumpadEnter),
    ("NumpadEqual", Key::NumpadEqual), ("NumLock", Key::NumLock),
    ("ArrowUp", Key::Up), ("ArrowDown", Key::Down),
    ("ArrowLeft", Key::Left), ("ArrowRight", Key::Right),
    ("Home", Key::Home), ("End", Key::End),
    ("PageUp", Key::PageUp), ("PageDown", Key::PageDown),
    ("Insert", Key::Insert), ("Delete", Key::Delete),
    ("Backspace", Key::Backspace), ("Tab", Key::Tab), ("Enter", Key::Enter),
    ("Escape", Key::Escape), ("Space", Key::Space),
    ("CapsLock", Key::CapsLock), ("ScrollLock", Key::ScrollLock),
    ("Pause", Key::Pause), ("PrintScreen", Key::PrintScreen),
    ("ContextMenu", Key::Menu),
    ("AltLeft", Key::AltLeft), ("AltRight", Key::AltRight),
    ("ControlLeft", Key::ControlLeft), ("ControlRight", Key::ControlRight),
    ("ShiftLeft", Key::ShiftLeft), ("ShiftRight", Key::ShiftRight),
    ("MetaLeft", Key::MetaLeft), ("MetaRight", Key::MetaRight),
    ("Comma", Key::Comma), ("Period", Key::Period),
    ("Semicolon", Key::Semicolon), ("Quote", Key::Quote),
    ("Backquote", Key::Backquote),
    ("BracketLeft", Key::BracketLeft), ("BracketRight", Key::BracketRight),
    ("Backslash", Key::Backslash), ("Slash", Key::Slash),
    ("Minus", Key::Minus), ("Equal", Key::Equal),
    ("Lang1", Key::Lang1), ("Lang2", Key::Lang2),
];

fn table() -> &'static HashMap<&'static str, Key> {
    static TABLE: OnceLock<HashMap<&'static str, Key>> = OnceLock::new();
    TABLE.get_or_init(|| CODES.iter().copied().collect())
}

/// Normalize a textual key-code string.
///
/// Returns [`Key::None`] for unrecognized codes.
#[must_use]
pub fn parse_key(code: &str) -> Key {
    table().get(code).copied().unwrap_or(Key::None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_map() {
        assert_eq!(parse_key("KeyA"), Key::A);
        assert_eq!(parse_key("KeyZ"), Key::Z);
        assert_eq!(parse_key("Digit0"), Key::Digit0);
        assert_eq!(parse_key("Digit9"), Key::Digit9);
    }

    #[test]
    fn function_keys_map_across_lengths() {
        assert_eq!(parse_key("F1"), Key::F1);
        assert_eq!(parse_key("F9"), Key::F9);
        assert_eq!(parse_key("F10"), Key::F10);
        assert_eq!(parse_key("F25"), Key::F25);
    }

    #[test]
    fn navigation_and_arrows_map() {
        assert_eq!(parse_key("ArrowUp"), Key::Up);
        assert_eq!(parse_key("ArrowRight"), Key::Right);
        assert_eq!(parse_key("PageDown"), Key::PageDown);
        assert_eq!(parse_key("Home"), Key::Home);
    }

    #[test]
    fn numpad_codes_map() {
        assert_eq!(parse_key("Numpad7"), Key::Numpad7);
        assert_eq!(parse_key("NumpadMultiply"), Key::NumpadMultiply);
        assert_eq!(parse_key("NumpadEnter"), Key::NumpadEnter);
    }

    #[test]
    fn modifiers_distinguish_sides() {
        assert_eq!(parse_key("ShiftLeft"), Key::ShiftLeft);
        assert_eq!(parse_key("ShiftRight"), Key::ShiftRight);
        assert_eq!(parse_key("MetaLeft"), Key::MetaLeft);
        assert_eq!(parse_key("ControlRight"), Key::ControlRight);
    }

    #[test]
    fn unrecognized_codes_are_none_not_errors() {
        assert_eq!(parse_key(""), Key::None);
        assert_eq!(parse_key("F26"), Key::None);
        assert_eq!(parse_key("NoSuchCode"), Key::None);
        assert_eq!(parse_key("keya"), Key::None);
    }

    #[test]
    fn table_has_no_duplicate_codes() {
        let mut codes: Vec<&str> = CODES.iter().map(|(code, _)| *code).collect();
        codes.sort_unstable();
        let before = codes.len();
        codes.dedup();
        assert_eq!(before, codes.len());
    }
}
