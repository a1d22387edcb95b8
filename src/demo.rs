//! Fabricated data for the offline demo identity
//!
//! Demo sessions never touch the network; items are generated from their
//! index so repeated sessions render the same data.

use crate::types::{IssuesConnection, Repository, RepositoryOwner, TotalCount, User, Viewer};

/// Login of the demo identity
pub const DEMO_LOGIN: &str = "demo-user";

/// Avatar used for every fabricated record
pub const DEMO_AVATAR_URL: &str = "https://avatars.githubusercontent.com/u/0";

/// Default number of fabricated repositories in a demo session
pub const DEFAULT_DEMO_REPOSITORY_COUNT: usize = 50;

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
    "eiusmod", "tempor", "incididunt", "labore", "dolore", "magna", "aliqua",
];

/// An item type that can be fabricated for demo sessions
pub trait DemoItem: Sized {
    /// Build the `index`-th fabricated item
    fn fabricate(index: usize) -> Self;
}

impl DemoItem for Repository {
    fn fabricate(index: usize) -> Self {
        let title = phrase(index, 2);
        Repository {
            name: format!("Repository {title}"),
            description: Some(phrase(index.wrapping_mul(7).wrapping_add(3), 6)),
            fork_count: pseudo_count(index, 1),
            owner: RepositoryOwner {
                login: DEMO_LOGIN.to_string(),
                avatar_url: DEMO_AVATAR_URL.to_string(),
            },
            issues: IssuesConnection {
                total_count: pseudo_count(index, 2),
                nodes: Vec::new(),
            },
            url: format!(
                "https://github.com/{DEMO_LOGIN}/repository-{}",
                title.replace(' ', "-")
            ),
            stargazers: TotalCount::new(pseudo_count(index, 3)),
            is_fork: false,
        }
    }
}

/// The demo identity as returned by the viewer lookup
pub fn viewer() -> Viewer {
    Viewer {
        login: DEMO_LOGIN.to_string(),
        name: Some("Demo User".to_string()),
        avatar_url: DEMO_AVATAR_URL.to_string(),
    }
}

/// A fabricated profile for any login
pub fn user(login: &str) -> User {
    let seed = login.bytes().map(usize::from).sum::<usize>();
    User {
        login: login.to_string(),
        name: Some(phrase(seed, 2)),
        avatar_url: DEMO_AVATAR_URL.to_string(),
        bio: Some(phrase(seed.wrapping_add(11), 8)),
        company: None,
        created_at: None,
        followers: TotalCount::new(pseudo_count(seed, 4)),
        following: TotalCount::new(pseudo_count(seed, 5)),
    }
}

/// Fabricate `count` items
pub fn fabricate<T: DemoItem>(count: usize) -> Vec<T> {
    (0..count).map(T::fabricate).collect()
}

fn phrase(seed: usize, words: usize) -> String {
    (0..words)
        .map(|i| WORDS[seed.wrapping_add(i * 5) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Deterministic count in `0..100`
fn pseudo_count(index: usize, salt: u64) -> u64 {
    let mut x = (index as u64)
        .wrapping_add(salt)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x ^= x >> 29;
    x % 100
}
