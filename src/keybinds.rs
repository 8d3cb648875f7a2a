use crate::config::Keybindings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Previous,
    First,
    Last,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// A `KeyboardEvent.key` value.
    pub key: String,
    pub action: Action,
}

impl Binding {
    pub fn resolve(key: &str, bindings: &[Binding]) -> Option<Action> {
        bindings.iter().find(|b| b.key == key).map(|b| b.action)
    }

    pub fn from_config(k: &Keybindings) -> Vec<Binding> {
        let mut bindings = Vec::new();
        let add = |target: &mut Vec<Binding>, keys: &[String], action: Action| {
            for key_str in keys {
                match parse_keybinding(key_str) {
                    Some(key) => target.push(Binding { key, action }),
                    None => log::warn!("Unknown key '{}' bound to {:?}", key_str, action),
                }
            }
        };

        add(&mut bindings, &k.next.0, Action::Next);
        add(&mut bindings, &k.previous.0, Action::Previous);
        add(&mut bindings, &k.first.0, Action::First);
        add(&mut bindings, &k.last.0, Action::Last);

        bindings
    }
}

const NAMED_KEYS: [&str; 13] = [
    "ArrowLeft",
    "ArrowRight",
    "ArrowUp",
    "ArrowDown",
    "Enter",
    "Escape",
    "Backspace",
    "Tab",
    "Home",
    "End",
    "PageUp",
    "PageDown",
    "Delete",
];

fn parse_keybinding(s: &str) -> Option<String> {
    let key = match s {
        "Left" => "ArrowLeft",
        "Right" => "ArrowRight",
        "Up" => "ArrowUp",
        "Down" => "ArrowDown",
        "Return" => "Enter",
        "Esc" => "Escape",
        "Space" => " ",
        k if NAMED_KEYS.contains(&k) => k,
        c if c.chars().count() == 1 => c,
        _ => return None,
    };
    Some(key.to_string())
}
