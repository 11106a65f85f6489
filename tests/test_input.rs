use bug_crossing::input::Action;
use crossterm::event::KeyCode;

// ── Browser key codes ─────────────────────────────────────────────────────────

#[test]
fn key_codes_map_to_actions() {
    assert_eq!(Action::from_key_code(13), Action::Enter);
    assert_eq!(Action::from_key_code(37), Action::Left);
    assert_eq!(Action::from_key_code(38), Action::Up);
    assert_eq!(Action::from_key_code(39), Action::Right);
    assert_eq!(Action::from_key_code(40), Action::Down);
}

#[test]
fn unmapped_key_codes_are_none() {
    for code in [0, 12, 14, 32, 36, 41, 65, 999, u32::MAX] {
        assert_eq!(Action::from_key_code(code), Action::None, "code {}", code);
    }
}

// ── Terminal keys ─────────────────────────────────────────────────────────────

#[test]
fn arrows_and_enter_map() {
    assert_eq!(Action::from_key(&KeyCode::Enter), Action::Enter);
    assert_eq!(Action::from_key(&KeyCode::Left), Action::Left);
    assert_eq!(Action::from_key(&KeyCode::Right), Action::Right);
    assert_eq!(Action::from_key(&KeyCode::Up), Action::Up);
    assert_eq!(Action::from_key(&KeyCode::Down), Action::Down);
}

#[test]
fn wasd_aliases_match_arrows() {
    assert_eq!(Action::from_key(&KeyCode::Char('a')), Action::from_key(&KeyCode::Left));
    assert_eq!(Action::from_key(&KeyCode::Char('D')), Action::from_key(&KeyCode::Right));
    assert_eq!(Action::from_key(&KeyCode::Char('w')), Action::from_key(&KeyCode::Up));
    assert_eq!(Action::from_key(&KeyCode::Char('S')), Action::from_key(&KeyCode::Down));
}

#[test]
fn other_keys_are_none() {
    for code in [KeyCode::Char('x'), KeyCode::Char(' '), KeyCode::Tab, KeyCode::F(1), KeyCode::Home] {
        assert_eq!(Action::from_key(&code), Action::None);
    }
}
