//! Grouping join instructions by alias and classifying each group.

use tether_core::JoinInstruction;
use tether_error::AssociationError;

use crate::utils::group_ordered;

/// One alias's join instructions, classified by cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Association<'j> {
    /// `parent[parent_key] == child[child_key]`.
    OneToMany {
        alias: &'j str,
        join: &'j JoinInstruction,
    },
    /// Parent to junction (`through`), then junction to the far-side table
    /// (`target`).
    ManyToMany {
        alias: &'j str,
        through: &'j JoinInstruction,
        target: &'j JoinInstruction,
    },
}

impl<'j> Association<'j> {
    pub fn alias(&self) -> &'j str {
        match *self {
            Association::OneToMany { alias, .. } | Association::ManyToMany { alias, .. } => alias,
        }
    }

    /// Tables the association reads besides the parent, in join order.
    pub fn child_tables(&self) -> Vec<&'j str> {
        match *self {
            Association::OneToMany { join, .. } => vec![join.child.as_str()],
            Association::ManyToMany {
                through, target, ..
            } => vec![through.child.as_str(), target.child.as_str()],
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Association::OneToMany { .. } => "one-to-many",
            Association::ManyToMany { .. } => "many-to-many",
        }
    }
}

/// Group instructions by alias, in first-seen alias order. Instructions keep
/// their relative order inside a group.
pub fn group_by_alias<'j>(
    instructions: &'j [JoinInstruction],
) -> Vec<(&'j str, Vec<&'j JoinInstruction>)> {
    group_ordered(instructions.iter(), |join: &&'j JoinInstruction| {
        let join: &'j JoinInstruction = *join;
        join.alias.as_str()
    })
}

/// Classify one alias group against the anchor (parent) table.
pub fn classify<'j>(
    alias: &'j str,
    group: &[&'j JoinInstruction],
    parent_table: &str,
) -> Result<Association<'j>, AssociationError> {
    let association = match *group {
        [join] => Association::OneToMany { alias, join },
        [through, target] => {
            if through.child != target.parent {
                return Err(AssociationError::BrokenChain {
                    alias: alias.to_string(),
                    junction: through.child.clone(),
                    next_parent: target.parent.clone(),
                });
            }
            Association::ManyToMany {
                alias,
                through,
                target,
            }
        }
        _ => {
            return Err(AssociationError::UnsupportedCardinality {
                alias: alias.to_string(),
                count: group.len(),
            })
        }
    };

    let first = match association {
        Association::OneToMany { join, .. } => join,
        Association::ManyToMany { through, .. } => through,
    };
    if first.parent != parent_table {
        return Err(AssociationError::ForeignAnchor {
            alias: alias.to_string(),
            expected: parent_table.to_string(),
            found: first.parent.clone(),
        });
    }
    Ok(association)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join(parent: &str, pk: &str, child: &str, ck: &str, alias: &str) -> JoinInstruction {
        JoinInstruction::new(parent, pk, child, ck, alias)
    }

    #[test]
    fn groups_by_alias_in_first_seen_order() {
        let joins = vec![
            join("user", "id", "user_tag", "userId", "tags"),
            join("user", "id", "post", "userId", "posts"),
            join("user_tag", "tagId", "tag", "id", "tags"),
        ];
        let groups = group_by_alias(&joins);
        let shape: Vec<_> = groups.iter().map(|(a, g)| (*a, g.len())).collect();
        assert_eq!(shape, vec![("tags", 2), ("posts", 1)]);
        assert_eq!(groups[0].1[1].child, "tag");
    }

    #[test]
    fn classifies_one_and_two_instruction_groups() {
        let posts = join("user", "id", "post", "userId", "posts");
        let through = join("user", "id", "user_tag", "userId", "tags");
        let target = join("user_tag", "tagId", "tag", "id", "tags");

        let one = classify("posts", &[&posts], "user").expect("one-to-many");
        assert_eq!(one.kind(), "one-to-many");
        assert_eq!(one.child_tables(), vec!["post"]);

        let two = classify("tags", &[&through, &target], "user").expect("many-to-many");
        assert_eq!(two.kind(), "many-to-many");
        assert_eq!(two.child_tables(), vec!["user_tag", "tag"]);
        assert_eq!(two.alias(), "tags");
    }

    #[test]
    fn rejects_other_cardinalities() {
        let j = join("user", "id", "post", "userId", "posts");
        let err = classify("posts", &[&j, &j, &j], "user").expect_err("three joins");
        assert_eq!(
            err,
            AssociationError::UnsupportedCardinality {
                alias: "posts".into(),
                count: 3
            }
        );
        assert!(matches!(
            classify("posts", &[], "user"),
            Err(AssociationError::UnsupportedCardinality { count: 0, .. })
        ));
    }

    #[test]
    fn rejects_broken_chain_and_foreign_anchor() {
        let through = join("user", "id", "user_tag", "userId", "tags");
        let stray = join("other", "tagId", "tag", "id", "tags");
        assert!(matches!(
            classify("tags", &[&through, &stray], "user"),
            Err(AssociationError::BrokenChain { .. })
        ));

        let posts = join("account", "id", "post", "userId", "posts");
        let err = classify("posts", &[&posts], "user").expect_err("foreign anchor");
        assert_eq!(err.alias(), "posts");
        assert!(matches!(err, AssociationError::ForeignAnchor { .. }));
    }
}
