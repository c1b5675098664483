//! Key mapping from terminal events to game actions.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;

use crate::scheme::ControlScheme;
use crate::types::{GameAction, LegendEntry};

/// Classic layout: arrows move/rotate/drop, space hard-drops.
pub fn classic_action(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Up => Some(GameAction::Rotate),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        _ => None,
    }
}

fn classic_key_label(action: GameAction) -> &'static str {
    match action {
        GameAction::MoveLeft => "←",
        GameAction::MoveRight => "→",
        GameAction::Rotate => "↑",
        GameAction::SoftDrop => "↓",
        GameAction::HardDrop => "Space",
    }
}

/// Legend for the classic layout (every key visible).
pub fn classic_legend() -> ArrayVec<LegendEntry, 5> {
    GameAction::ALL
        .iter()
        .map(|&action| LegendEntry {
            action,
            key: Some(classic_key_label(action).to_string()),
        })
        .collect()
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key starts a new game.
pub fn is_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
        && !key.modifiers.contains(KeyModifiers::CONTROL)
}

/// The active binding set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bindings {
    Classic,
    Hidden(ControlScheme),
}

impl Bindings {
    /// Hidden bindings with freshly dealt letters
    pub fn hidden<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Bindings::Hidden(ControlScheme::deal(rng))
    }

    /// Resolve a key press. Hidden bindings remember the press as a discovery.
    pub fn resolve(&mut self, key: KeyEvent) -> Option<GameAction> {
        match self {
            Bindings::Classic => classic_action(key),
            Bindings::Hidden(scheme) => {
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    return None;
                }
                match key.code {
                    KeyCode::Char(ch) => scheme.press(ch),
                    _ => None,
                }
            }
        }
    }

    pub fn legend(&self) -> ArrayVec<LegendEntry, 5> {
        match self {
            Bindings::Classic => classic_legend(),
            Bindings::Hidden(scheme) => scheme.legend(),
        }
    }

    /// New game: hidden letters are re-dealt and forgotten.
    pub fn redeal<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Bindings::Hidden(scheme) = self {
            scheme.reset(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_classic_keys() {
        assert_eq!(
            classic_action(KeyEvent::from(KeyCode::Left)),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            classic_action(KeyEvent::from(KeyCode::Right)),
            Some(GameAction::MoveRight)
        );
        assert_eq!(
            classic_action(KeyEvent::from(KeyCode::Up)),
            Some(GameAction::Rotate)
        );
        assert_eq!(
            classic_action(KeyEvent::from(KeyCode::Down)),
            Some(GameAction::SoftDrop)
        );
        assert_eq!(
            classic_action(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameAction::HardDrop)
        );
        assert_eq!(classic_action(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_and_restart_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));

        assert!(is_restart(KeyEvent::from(KeyCode::Char('R'))));
        assert!(!is_restart(KeyEvent::from(KeyCode::Char('t'))));
    }

    #[test]
    fn test_classic_legend_shows_every_key() {
        let legend = classic_legend();
        assert_eq!(legend.len(), 5);
        assert!(legend.iter().all(|entry| entry.key.is_some()));
    }

    #[test]
    fn test_hidden_bindings_resolve_letters_only() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut bindings = Bindings::hidden(&mut rng);
        let Bindings::Hidden(scheme) = &bindings else {
            panic!("expected hidden bindings");
        };
        let left = scheme.key_for(GameAction::MoveLeft);

        // Arrows do nothing under hidden bindings.
        assert_eq!(bindings.resolve(KeyEvent::from(KeyCode::Left)), None);
        assert_eq!(
            bindings.resolve(KeyEvent::from(KeyCode::Char(left.to_ascii_lowercase()))),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            bindings.resolve(KeyEvent::new(KeyCode::Char(left), KeyModifiers::CONTROL)),
            None
        );

        let legend = bindings.legend();
        assert_eq!(legend[0].key, Some(left.to_string()));
        assert!(legend[1..].iter().all(|entry| entry.key.is_none()));
    }

    #[test]
    fn test_redeal_forgets_discoveries() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut bindings = Bindings::hidden(&mut rng);
        if let Bindings::Hidden(scheme) = &bindings {
            let key = scheme.key_for(GameAction::HardDrop);
            bindings.resolve(KeyEvent::from(KeyCode::Char(key)));
        }
        assert!(bindings.legend().iter().any(|entry| entry.key.is_some()));

        bindings.redeal(&mut rng);
        assert!(bindings.legend().iter().all(|entry| entry.key.is_none()));
    }
}
