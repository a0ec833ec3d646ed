//! Property-based tests for repository URL parsing and reassembly.

use crate::repo_url::{
    extract_repo_domain, extract_repo_name, extract_repo_token, reassemble_repo_url,
    redact_credentials,
};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_][A-Za-z0-9_.-]{0,15}".prop_filter("not a git suffix", |s| !s.ends_with(".git"))
}

fn host() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,10}(\\.[a-z][a-z0-9]{1,5}){0,2}"
}

fn token() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_]{1,40}"
}

proptest! {
    /// Property: the extractors are total
    #[test]
    fn extractors_never_panic(input in ".*") {
        let _ = extract_repo_name(&input);
        let _ = extract_repo_domain(&input);
        let _ = extract_repo_token(&input);
        let _ = reassemble_repo_url(&input, Some("t"));
        let _ = redact_credentials(&input);
    }

    /// Property: https, ssh and scp-style URLs agree on name and domain
    #[test]
    fn url_shapes_agree(host in host(), owner in segment(), name in segment()) {
        let expected = format!("{}/{}", owner, name);
        let shapes = [
            format!("https://{}/{}/{}.git", host, owner, name),
            format!("git+https://{}/{}/{}", host, owner, name),
            format!("ssh://git@{}/{}/{}.git", host, owner, name),
            format!("git@{}:{}/{}.git", host, owner, name),
        ];

        for url in &shapes {
            prop_assert_eq!(extract_repo_name(url), Some(expected.clone()), "name of {}", url);
            prop_assert_eq!(extract_repo_domain(url), Some(host.clone()), "domain of {}", url);
        }
    }

    /// Property: reassembled URLs are authenticated https URLs ending in .git
    #[test]
    fn reassembled_url_shape(
        host in host(),
        owner in segment(),
        name in segment(),
        token in token(),
    ) {
        let url = format!("git@{}:{}/{}.git", host, owner, name);
        let rebuilt = reassemble_repo_url(&url, Some(&token)).unwrap();

        prop_assert!(rebuilt.starts_with("https://"));
        prop_assert!(rebuilt.ends_with(".git"));
        prop_assert_eq!(extract_repo_token(&rebuilt), Some(token));
        prop_assert_eq!(extract_repo_name(&rebuilt), Some(format!("{}/{}", owner, name)));
    }

    /// Property: reassembly is idempotent for a fixed token
    #[test]
    fn reassembly_is_idempotent(
        host in host(),
        owner in segment(),
        name in segment(),
        token in token(),
    ) {
        let url = format!("https://{}/{}/{}", host, owner, name);
        let once = reassemble_repo_url(&url, Some(&token)).unwrap();
        let twice = reassemble_repo_url(&once, Some(&token)).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Property: redaction removes the credential
    #[test]
    fn redaction_hides_token(
        host in host(),
        owner in segment(),
        name in segment(),
        token in "[A-Za-z0-9]{8,40}",
    ) {
        let url = format!("https://{}@{}/{}/{}.git", token, host, owner, name);
        let redacted = redact_credentials(&url);
        let leaked = format!("{}@", token);
        prop_assert!(!redacted.contains(&leaked));
        prop_assert_eq!(redacted, format!("https://***@{}/{}/{}.git", host, owner, name));
    }

    /// Property: credentials that need percent-encoding are masked as written
    #[test]
    fn redaction_hides_encodable_credentials(
        host in host(),
        owner in segment(),
        name in segment(),
        user in "[A-Za-z0-9{}!$&'()*+,;=~-]{1,20}",
        password in "[A-Za-z0-9{}!$&'()*+,;=~ -]{8,30}",
    ) {
        let url = format!("https://{}:{}@{}/{}/{}.git", user, password, host, owner, name);
        let redacted = redact_credentials(&url);
        prop_assert_eq!(redacted, format!("https://***@{}/{}/{}.git", host, owner, name));
    }
}
