use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One conversational turn. Immutable once appended to a persona's history;
/// ordering is chronological and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Role, Turn};

    #[test]
    fn user_constructor_sets_role() {
        let turn = Turn::user("hello");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.text, "hello");
    }

    #[test]
    fn assistant_constructor_sets_role() {
        let turn = Turn::assistant("hi there");
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.text, "hi there");
    }

    #[test]
    fn role_serializes_snake_case() {
        let value = serde_json::to_value(Role::Assistant).unwrap();
        assert_eq!(value, serde_json::json!("assistant"));
    }
}
