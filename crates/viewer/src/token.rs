use serde::Deserialize;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
pub enum TokenKind {
    Document,
    ObjectValue,
    ObjectField,
    ArrayValue,
    Value,
    #[serde(other)]
    Other,
}

/// Parser state attached to an editor token. States form a chain from the
/// token back to the document root through `prev_state`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenState {
    pub kind: Option<TokenKind>,
    pub name: Option<String>,
    pub prev_state: Option<Box<TokenState>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub string: String,
    pub state: TokenState,
}

/// Object keys leading from the result root to the token, outermost first.
pub fn result_path(state: &TokenState) -> Vec<String> {
    let mut path = Vec::new();
    let mut state = state;
    while let Some(prev_state) = &state.prev_state {
        if state.kind == Some(TokenKind::ObjectField) {
            if let Some(name) = &state.name {
                path.push(name.replace('"', ""));
            }
        }
        state = prev_state;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuilds_path_from_state_chain() {
        let state: TokenState = serde_json::from_value(serde_json::json!({
            "kind": "Value",
            "prevState": {
                "kind": "ObjectField",
                "name": "\"name\"",
                "prevState": {
                    "kind": "ObjectValue",
                    "prevState": {
                        "kind": "ArrayValue",
                        "prevState": {
                            "kind": "ObjectField",
                            "name": "\"users\"",
                            "prevState": {
                                "kind": "ObjectValue",
                                "prevState": {
                                    "kind": "ObjectField",
                                    "name": "\"data\"",
                                    "prevState": { "kind": "Document" }
                                }
                            }
                        }
                    }
                }
            }
        }))
        .unwrap();

        assert_eq!(result_path(&state), ["data", "users", "name"]);
    }

    #[test]
    fn root_state_is_not_part_of_the_path() {
        let state = TokenState {
            kind: Some(TokenKind::ObjectField),
            name: Some("\"orphan\"".to_string()),
            prev_state: None,
        };
        assert!(result_path(&state).is_empty());
    }
}
