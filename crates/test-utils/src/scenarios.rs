//! Canonical caches and join instructions: users with posts (one-to-many)
//! and users with tags through a `user_tag` junction (many-to-many).

use tether_core::{record, JoinInstruction, Record, TableCache, Value};

pub fn user(id: i64, name: &str) -> Record {
    record! { "id" => id, "name" => name }
}

pub fn post(id: i64, user_id: i64, title: &str) -> Record {
    record! { "id" => id, "userId" => user_id, "title" => title }
}

pub fn user_tag(id: i64, user_id: i64, tag_id: impl Into<Value>) -> Record {
    record! { "id" => id, "userId" => user_id, "tagId" => tag_id }
}

pub fn tag(id: i64, label: &str) -> Record {
    record! { "id" => id, "label" => label }
}

pub fn posts_join() -> JoinInstruction {
    JoinInstruction::new("user", "id", "post", "userId", "posts")
}

pub fn tags_joins() -> Vec<JoinInstruction> {
    vec![
        JoinInstruction::new("user", "id", "user_tag", "userId", "tags"),
        JoinInstruction::new("user_tag", "tagId", "tag", "id", "tags"),
    ]
}

/// One user with two posts.
pub fn one_to_many_cache() -> TableCache {
    TableCache::new()
        .with_table("user", vec![user(1, "A")])
        .with_table("post", vec![post(10, 1, "X"), post(11, 1, "Y")])
}

/// One user linked to one tag.
pub fn many_to_many_cache() -> TableCache {
    TableCache::new()
        .with_table("user", vec![user(1, "A")])
        .with_table("user_tag", vec![user_tag(100, 1, 9)])
        .with_table("tag", vec![tag(9, "vip")])
}

/// Three users, posts and tags interleaved out of parent order, one user
/// with nothing, plus junction rows with falsy and dangling tag ids.
pub fn mixed_cache() -> TableCache {
    TableCache::new()
        .with_table("user", vec![user(3, "C"), user(1, "A"), user(2, "B")])
        .with_table(
            "post",
            vec![post(12, 1, "Z"), post(10, 3, "X"), post(11, 1, "Y")],
        )
        .with_table(
            "user_tag",
            vec![
                user_tag(100, 1, 9),
                user_tag(101, 3, 8),
                user_tag(102, 1, Value::Null),
                user_tag(103, 1, 0),
                user_tag(104, 1, 8),
            ],
        )
        .with_table("tag", vec![tag(8, "new"), tag(9, "vip")])
}

/// Both associations of [`mixed_cache`], posts first.
pub fn mixed_joins() -> Vec<JoinInstruction> {
    let mut joins = vec![posts_join()];
    joins.extend(tags_joins());
    joins
}

/// A synthetic many-to-many cache for benches: `users` parents, each linked
/// to `links_per_user` tags out of `tags`.
pub fn synthetic_many_to_many(users: i64, tags: i64, links_per_user: i64) -> TableCache {
    let tags = tags.max(1);
    let user_rows = (1..=users).map(|id| user(id, "u")).collect();
    let tag_rows = (1..=tags).map(|id| tag(id, "t")).collect();
    let link_rows = (1..=users)
        .flat_map(|u| (0..links_per_user).map(move |n| (u, n)))
        .enumerate()
        .map(|(i, (u, n))| user_tag(i as i64 + 1, u, (u + n) % tags + 1))
        .collect();
    TableCache::new()
        .with_table("user", user_rows)
        .with_table("user_tag", link_rows)
        .with_table("tag", tag_rows)
}
