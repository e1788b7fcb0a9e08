use phrygian_core::db::{create_catalog, open_catalog_in_memory};
use phrygian_core::{
    Difficulty, ErrorKind, RepoError, RouteRepository, RouteService, SharedCatalog,
    SqliteRouteRepository,
};
use rusqlite::Connection;

fn insert_route(conn: &Connection, route_id: &str, name: &str) {
    conn.execute(
        "INSERT INTO routes (route_id, name, distance_km, duration_days, difficulty)
         VALUES (?1, ?2, 12.5, 1, 'easy');",
        [route_id, name],
    )
    .unwrap();
}

#[test]
fn list_returns_seeded_routes_in_insertion_order() {
    let conn = open_catalog_in_memory().unwrap();
    insert_route(&conn, "loop-a", "Loop A");

    let repo = SqliteRouteRepository::new(&conn);
    let routes = repo.list_routes().unwrap();
    let ids = routes
        .iter()
        .map(|route| route.route_id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["section-1", "section-2", "section-3", "loop-a"]);
}

#[test]
fn get_by_id_returns_route() {
    let conn = open_catalog_in_memory().unwrap();
    let service = RouteService::new(SqliteRouteRepository::new(&conn));

    let route = service.get_by_id("section-2").unwrap().unwrap();
    assert_eq!(route.name, "Yazilikaya to Ayazini");
    assert_eq!(route.difficulty, Some(Difficulty::Easy));
    assert_eq!(route.duration_days, Some(2));
}

#[test]
fn get_by_id_missing_is_none_not_error() {
    let conn = open_catalog_in_memory().unwrap();
    let service = RouteService::new(SqliteRouteRepository::new(&conn));
    assert!(service.get_by_id("nonexistent-route").unwrap().is_none());
}

#[test]
fn route_serializes_in_camel_case() {
    let conn = open_catalog_in_memory().unwrap();
    let repo = SqliteRouteRepository::new(&conn);
    let route = repo.get_route("section-1").unwrap().unwrap();

    let value = serde_json::to_value(&route).unwrap();
    assert_eq!(value["routeId"], "section-1");
    assert_eq!(value["distanceKm"], 42.5);
    assert_eq!(value["difficulty"], "moderate");
}

#[test]
fn missing_table_is_catalog_unavailable() {
    let conn = Connection::open_in_memory().unwrap();
    let service = RouteService::new(SqliteRouteRepository::new(&conn));
    let err = service.list_all().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CatalogUnavailable);
}

#[test]
fn invalid_persisted_difficulty_is_rejected() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE routes (
            id INTEGER PRIMARY KEY, route_id TEXT, name TEXT, description TEXT,
            distance_km REAL, duration_days INTEGER, difficulty TEXT,
            start_point TEXT, end_point TEXT, created_at INTEGER
         );
         INSERT INTO routes (route_id, name, difficulty, created_at)
         VALUES ('odd', 'Odd', 'extreme', 0);",
    )
    .unwrap();

    let err = SqliteRouteRepository::new(&conn).list_routes().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn shared_catalog_with_missing_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = SharedCatalog::lazy(dir.path().join("absent.db"));

    let err = catalog.with_routes(|routes| routes.list_all()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CatalogUnavailable);
    assert!(!dir.path().join("absent.db").exists());
}

#[test]
fn shared_catalog_opens_file_once_and_reuses_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("phrygian.db");
    {
        let conn = create_catalog(&path).unwrap();
        phrygian_core::db::migrations::run_migration_script(
            &conn,
            phrygian_core::db::migrations::INIT_SCRIPT,
        )
        .unwrap();
    }

    let catalog = SharedCatalog::lazy(&path);
    let first = catalog.with_routes(|routes| routes.list_all()).unwrap();
    let second = catalog
        .with_routes(|routes| routes.get_by_id("section-3"))
        .unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(second.unwrap().route_id, "section-3");
}
