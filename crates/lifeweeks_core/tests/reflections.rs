use chrono::{DateTime, Duration, TimeZone, Utc};
use lifeweeks_core::db::open_db_in_memory;
use lifeweeks_core::model::reflection::{LEGACY_SPENT_WELL_LABEL, SPENT_WELL_LABEL};
use lifeweeks_core::{
    Reflection, ReflectionRepository, ReflectionService, ReflectionType, RepoError,
    SqliteReflectionRepository,
};
use uuid::Uuid;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 12, 20, 0, 0).unwrap()
}

#[test]
fn type_labels_decode_with_legacy_and_fallback() {
    assert_eq!(ReflectionType::from_label("Meaningful"), ReflectionType::SpentWell);
    assert_eq!(ReflectionType::from_label("Spent Well"), ReflectionType::SpentWell);
    assert_eq!(ReflectionType::from_label("Wasted"), ReflectionType::Wasted);
    assert_eq!(ReflectionType::from_label("Bogus"), ReflectionType::SpentWell);
}

#[test]
fn parse_label_agrees_with_from_label_for_known_labels() {
    for label in ["Spent Well", "Meaningful", "Wasted"] {
        assert_eq!(
            ReflectionType::parse_label(label),
            Some(ReflectionType::from_label(label))
        );
    }
    for kind in ReflectionType::ALL {
        assert_eq!(ReflectionType::parse_label(kind.label()), Some(kind));
    }
    assert_eq!(ReflectionType::parse_label("Bogus"), None);
    assert_eq!(ReflectionType::parse_label(""), None);
    assert_eq!(ReflectionType::parse_label("wasted"), None);
    assert_eq!(ReflectionType::default(), ReflectionType::SpentWell);
}

#[test]
fn type_labels_encode_current_form_only() {
    assert_eq!(ReflectionType::SpentWell.label(), SPENT_WELL_LABEL);
    assert_eq!(ReflectionType::Wasted.label(), "Wasted");
    for kind in ReflectionType::ALL {
        assert_ne!(kind.label(), LEGACY_SPENT_WELL_LABEL);
    }
}

#[test]
fn reflection_serialization_uses_type_label() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let reflection = Reflection::with_id(id, ReflectionType::SpentWell, "shipped", fixed_now());

    let json = serde_json::to_value(&reflection).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["type"], "Spent Well");
    assert_eq!(json["explanation"], "shipped");

    let mut legacy = json.clone();
    legacy["type"] = serde_json::json!("Meaningful");
    let decoded: Reflection = serde_json::from_value(legacy).unwrap();
    assert_eq!(decoded, reflection);
}

#[test]
fn create_then_list_orders_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let service = ReflectionService::new(SqliteReflectionRepository::try_new(&conn).unwrap());

    let oldest = service
        .create_reflection(ReflectionType::SpentWell, "one", fixed_now())
        .unwrap();
    let middle = service
        .create_reflection(ReflectionType::Wasted, "two", fixed_now() + Duration::days(1))
        .unwrap();
    let newest = service
        .create_reflection(ReflectionType::SpentWell, "three", fixed_now() + Duration::days(2))
        .unwrap();

    let listed = service.list_reflections().unwrap();
    assert_eq!(listed, vec![newest, middle, oldest]);
    assert!(listed.windows(2).all(|pair| pair[0].date > pair[1].date));
}

#[test]
fn same_date_reflections_keep_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let service = ReflectionService::new(SqliteReflectionRepository::try_new(&conn).unwrap());

    let first = service
        .create_reflection(ReflectionType::SpentWell, "first", fixed_now())
        .unwrap();
    let second = service
        .create_reflection(ReflectionType::Wasted, "second", fixed_now())
        .unwrap();
    let earlier = service
        .create_reflection(ReflectionType::Wasted, "earlier", fixed_now() - Duration::hours(1))
        .unwrap();

    let ids: Vec<_> = service
        .list_reflections()
        .unwrap()
        .into_iter()
        .map(|reflection| reflection.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id, earlier.id]);
}

#[test]
fn delete_removes_record_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ReflectionService::new(SqliteReflectionRepository::try_new(&conn).unwrap());

    let keep = service
        .create_reflection(ReflectionType::SpentWell, "keep", fixed_now())
        .unwrap();
    let doomed = service
        .create_reflection(ReflectionType::Wasted, "x", fixed_now())
        .unwrap();

    service.delete_reflection(&doomed).unwrap();
    let listed = service.list_reflections().unwrap();
    assert_eq!(listed, vec![keep]);

    let err = service.delete_reflection(&doomed).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == doomed.id));
    assert_eq!(service.list_reflections().unwrap().len(), 1);
}

#[test]
fn get_reflection_returns_detail_or_none() {
    let conn = open_db_in_memory().unwrap();
    let service = ReflectionService::new(SqliteReflectionRepository::try_new(&conn).unwrap());

    let created = service
        .create_reflection(ReflectionType::Wasted, "scrolling", fixed_now())
        .unwrap();
    assert_eq!(service.get_reflection(created.id).unwrap(), Some(created));
    assert_eq!(service.get_reflection(Uuid::new_v4()).unwrap(), None);
}

#[test]
fn stored_legacy_and_unknown_labels_are_normalized_on_read() {
    let conn = open_db_in_memory().unwrap();
    let legacy_id = Uuid::new_v4();
    let unknown_id = Uuid::new_v4();
    conn.execute(
        "INSERT INTO reflections (uuid, date, type, explanation) VALUES (?1, 1000, 'Meaningful', 'old');",
        [legacy_id.to_string()],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO reflections (uuid, date, type, explanation) VALUES (?1, 500, 'Bogus', '');",
        [unknown_id.to_string()],
    )
    .unwrap();

    let repo = SqliteReflectionRepository::try_new(&conn).unwrap();
    let listed = repo.list_reflections().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, legacy_id);
    assert_eq!(listed[0].kind, ReflectionType::SpentWell);
    assert_eq!(listed[1].kind, ReflectionType::SpentWell);

    let raw_label: String = conn
        .query_row(
            "SELECT type FROM reflections WHERE uuid = ?1;",
            [legacy_id.to_string()],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(raw_label, "Meaningful");
}

#[test]
fn new_records_are_written_with_current_label() {
    let conn = open_db_in_memory().unwrap();
    let service = ReflectionService::new(SqliteReflectionRepository::try_new(&conn).unwrap());
    let created = service
        .create_reflection(ReflectionType::SpentWell, "", fixed_now())
        .unwrap();

    let raw_label: String = conn
        .query_row(
            "SELECT type FROM reflections WHERE uuid = ?1;",
            [created.id.to_string()],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(raw_label, "Spent Well");
}

#[test]
fn corrupt_uuid_row_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO reflections (uuid, date, type, explanation) VALUES ('nope', 1, 'Wasted', '');",
        [],
    )
    .unwrap();

    let repo = SqliteReflectionRepository::try_new(&conn).unwrap();
    let err = repo.list_reflections().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
