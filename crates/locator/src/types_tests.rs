use super::*;

fn issue(id: &str, number: u64, name: &str, owner: &str) -> IssueContent {
    IssueContent {
        id: ContentId::new(id).unwrap(),
        number: IssueNumber::new(number).unwrap(),
        repository_name: RepositoryName::new(name).unwrap(),
        repository_owner: RepositoryOwner::new(owner).unwrap(),
    }
}

fn coordinates(number: u64, name: &str, owner: &str) -> IssueCoordinates {
    IssueCoordinates {
        number: IssueNumber::new(number),
        repository_name: RepositoryName::new(name),
        repository_owner: RepositoryOwner::new(owner),
    }
}

#[test]
fn test_content_id_takes_precedence_over_coordinates() {
    let key = MatchKey::from_inputs(ContentId::new("I_1"), coordinates(42, "infra", "acme"));
    assert_eq!(key, MatchKey::ByContentId(ContentId::new("I_1").unwrap()));
}

#[test]
fn test_coordinates_used_when_no_content_id() {
    let key = MatchKey::from_inputs(None, coordinates(42, "infra", "acme"));
    assert_eq!(key, MatchKey::ByCoordinates(coordinates(42, "infra", "acme")));
}

#[test]
fn test_content_id_key_ignores_coordinates() {
    let key = MatchKey::ByContentId(ContentId::new("I_1").unwrap());
    assert!(key.matches(&issue("I_1", 7, "other", "someone")));
    assert!(!key.matches(&issue("I_2", 42, "infra", "acme")));
}

#[test]
fn test_coordinates_key_requires_all_three_fields_to_match() {
    let key = MatchKey::ByCoordinates(coordinates(42, "infra", "acme"));
    assert!(key.matches(&issue("I_9", 42, "infra", "acme")));
    assert!(!key.matches(&issue("I_9", 43, "infra", "acme")));
    assert!(!key.matches(&issue("I_9", 42, "web", "acme")));
    assert!(!key.matches(&issue("I_9", 42, "infra", "globex")));
}

#[test]
fn test_incomplete_coordinates_never_match() {
    let partial = IssueCoordinates {
        number: IssueNumber::new(42),
        repository_name: RepositoryName::new("infra"),
        repository_owner: None,
    };
    let key = MatchKey::ByCoordinates(partial);

    assert!(!key.is_resolvable());
    assert!(!key.matches(&issue("I_9", 42, "infra", "acme")));
}

#[test]
fn test_empty_coordinates_are_not_resolvable() {
    let key = MatchKey::from_inputs(None, IssueCoordinates::default());
    assert!(!key.is_resolvable());
}

#[test]
fn test_match_key_display() {
    let by_id = MatchKey::ByContentId(ContentId::new("I_1").unwrap());
    assert_eq!(by_id.to_string(), "content I_1");

    let by_coordinates = MatchKey::ByCoordinates(coordinates(42, "infra", "acme"));
    assert_eq!(by_coordinates.to_string(), "acme/infra#42");

    let partial = MatchKey::ByCoordinates(IssueCoordinates {
        number: IssueNumber::new(5),
        ..IssueCoordinates::default()
    });
    assert_eq!(partial.to_string(), "?/?#5");
}
