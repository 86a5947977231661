use serde::{Deserialize, Serialize};

/// Declares that `parent[parent_key] == child[child_key]` and that the matched
/// child data belongs under `alias` on the parent rows.
///
/// Field names serialize in camelCase (`parentKey`, `childKey`) to match the
/// request format produced upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinInstruction {
    #[serde(default)]
    pub parent: String,
    #[serde(default)]
    pub parent_key: String,
    #[serde(default)]
    pub child: String,
    #[serde(default)]
    pub child_key: String,
    #[serde(default)]
    pub alias: String,
}

impl JoinInstruction {
    pub fn new(
        parent: impl Into<String>,
        parent_key: impl Into<String>,
        child: impl Into<String>,
        child_key: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        Self {
            parent: parent.into(),
            parent_key: parent_key.into(),
            child: child.into(),
            child_key: child_key.into(),
            alias: alias.into(),
        }
    }

    /// The first required field that is empty, by its serialized name.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("parent", &self.parent),
            ("parentKey", &self.parent_key),
            ("child", &self.child),
            ("childKey", &self.child_key),
            ("alias", &self.alias),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_round_trip_of_request_format() {
        let json = r#"{"parent":"user","parentKey":"id","child":"post","childKey":"userId","alias":"posts"}"#;
        let join: JoinInstruction = serde_json::from_str(json).expect("instruction");
        assert_eq!(join, JoinInstruction::new("user", "id", "post", "userId", "posts"));
    }

    #[test]
    fn reports_first_missing_field() {
        let join: JoinInstruction =
            serde_json::from_str(r#"{"parent":"user","child":"post"}"#).expect("partial");
        assert_eq!(join.first_missing_field(), Some("parentKey"));
        assert_eq!(
            JoinInstruction::new("a", "b", "c", "d", "e").first_missing_field(),
            None
        );
    }
}
