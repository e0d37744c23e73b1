use std::sync::Arc;

use uuid::Uuid;

use mfgdir_domain::{
	capability::{CapabilitySlug, VolumeLevel},
	cursor::{Cursor, CursorToken},
	filters::{RawBoundingBox, RawFilters, RouteDefaults},
};
use mfgdir_service::{CompanyRequest, DirectoryService, Error, SearchRequest, SearchResponse};
use mfgdir_storage::CompanyStore;
use mfgdir_testkit::{FaultyStore, MemoryStore, StoreOp, fixtures};

fn directory() -> MemoryStore {
	MemoryStore::new(fixtures::manufacturers())
}

fn service(store: Arc<dyn CompanyStore>) -> DirectoryService {
	DirectoryService::new(mfgdir_testkit::service_config("postgres://localhost/mfgdir"), store)
}

fn memory_service() -> DirectoryService {
	service(Arc::new(directory()))
}

fn strings(values: &[&str]) -> Vec<String> {
	values.iter().map(|value| value.to_string()).collect()
}

fn filtered(states: &[&str], capabilities: &[&str], volume: Option<&str>) -> SearchRequest {
	SearchRequest {
		filters: RawFilters {
			states: strings(states),
			capabilities: strings(capabilities),
			production_volume: volume.map(str::to_string),
		},
		..Default::default()
	}
}

fn names(response: &SearchResponse) -> Vec<&str> {
	response.companies.iter().map(|company| company.company_name.as_str()).collect()
}

fn decoded(token: Option<&str>) -> Cursor {
	match CursorToken::from_optional(token) {
		CursorToken::Valid(cursor) => cursor,
		CursorToken::NoCursor => panic!("Expected a decodable cursor, got {token:?}."),
	}
}

fn west_coast() -> RawBoundingBox {
	RawBoundingBox {
		min_lng: Some(-125.0),
		min_lat: Some(32.0),
		max_lng: Some(-114.0),
		max_lat: Some(49.0),
	}
}

#[tokio::test]
async fn states_match_any_selected_state_once_per_company() {
	let response =
		memory_service().search(filtered(&["ca", " TX "], &[], None)).await.expect("search");

	assert_eq!(response.total_count, 8);
	assert_eq!(
		names(&response),
		vec![
			"Acme Electronics",
			"Bay Circuit Works",
			"Delta PCB Solutions",
			"Frontier Harness Co",
			"Golden State Assembly",
			"Horizon Contract Mfg",
			"Lone Star Box Build",
			"Pacific Rim Electronics",
		]
	);
	assert!(!response.has_next);
	assert!(!response.has_prev);
	assert_eq!(response.next_cursor, None);
}

#[tokio::test]
async fn categories_intersect() {
	let response = memory_service()
		.search(filtered(&["CA"], &["smt"], Some("medium")))
		.await
		.expect("search");

	assert_eq!(response.total_count, 4);
	assert_eq!(
		names(&response),
		vec![
			"Acme Electronics",
			"Bay Circuit Works",
			"Golden State Assembly",
			"Horizon Contract Mfg"
		]
	);
}

#[tokio::test]
async fn production_volume_filters_on_the_capability_record() {
	let response =
		memory_service().search(filtered(&[], &[], Some("Medium"))).await.expect("search");

	assert_eq!(response.total_count, 5);
	assert_eq!(response.companies.len(), 5);
}

#[tokio::test]
async fn capability_union_pages_through_the_default_page_size() {
	let svc = memory_service();
	let first = svc.search(filtered(&[], &["smt", "box_build"], None)).await.expect("search");

	assert_eq!(first.total_count, 10);
	assert_eq!(first.companies.len(), 9);
	assert!(first.has_next);
	assert!(!first.has_prev);
	assert_eq!(decoded(first.next_cursor.as_deref()).name, "Northern Lights EMS");

	let second = svc
		.search(SearchRequest {
			cursor: first.next_cursor.clone(),
			..filtered(&[], &["smt", "box_build"], None)
		})
		.await
		.expect("search");

	assert_eq!(second.total_count, 10);
	assert_eq!(names(&second), vec!["Summit Technologies"]);
	assert!(!second.has_next);
	assert!(second.has_prev);
	assert_eq!(decoded(second.prev_cursor.as_deref()).name, "Northern Lights EMS");
}

#[tokio::test]
async fn replaying_next_cursor_continues_without_overlap() {
	let svc = memory_service();
	let first = svc
		.search(SearchRequest { page_size: Some(9), ..Default::default() })
		.await
		.expect("search");

	assert_eq!(first.companies.len(), 9);
	assert_eq!(names(&first).last(), Some(&"Lone Star Box Build"));
	assert!(first.has_next);

	let second = svc
		.search(SearchRequest {
			page_size: Some(9),
			cursor: first.next_cursor.clone(),
			..Default::default()
		})
		.await
		.expect("search");

	assert_eq!(
		names(&second),
		vec!["Northern Lights EMS", "Pacific Rim Electronics", "Summit Technologies"]
	);
	assert_eq!(second.total_count, 12);
	assert!(!second.has_next);
	assert!(second.has_prev);
	assert_eq!(second.next_cursor, None);

	let anchor = decoded(second.prev_cursor.as_deref());

	assert_eq!(anchor.name, "Lone Star Box Build");
	assert_eq!(anchor.id, fixtures::company_id(9));

	let replay = svc
		.search(SearchRequest {
			page_size: Some(9),
			cursor: first.next_cursor.clone(),
			..Default::default()
		})
		.await
		.expect("search");

	assert_eq!(names(&replay), names(&second));
}

#[tokio::test]
async fn unfiltered_search_without_page_size_returns_everything() {
	let response = memory_service().search(SearchRequest::default()).await.expect("search");

	assert_eq!(response.companies.len(), 12);
	assert_eq!(response.total_count, 12);
	assert!(!response.has_next);
	assert_eq!(response.facet_counts, None);
}

#[tokio::test]
async fn malformed_cursor_is_ignored() {
	let response = memory_service()
		.search(SearchRequest {
			cursor: Some("%%not-a-cursor%%".to_string()),
			..Default::default()
		})
		.await
		.expect("search");

	assert_eq!(response.companies.len(), 12);
	assert!(!response.has_prev);
	assert_eq!(response.prev_cursor, None);
}

#[tokio::test]
async fn stale_cursor_past_the_end_yields_an_empty_page() {
	let stale = Cursor::new("Zephyr Industries", Uuid::max()).encode();
	let response = memory_service()
		.search(SearchRequest { cursor: Some(stale), ..Default::default() })
		.await
		.expect("search");

	assert!(response.companies.is_empty());
	assert_eq!(response.total_count, 12);
	assert!(!response.has_next);
	assert!(!response.has_prev);
}

#[tokio::test]
async fn zero_page_size_is_rejected() {
	let err = memory_service()
		.search(SearchRequest { page_size: Some(0), ..Default::default() })
		.await
		.expect_err("Expected zero page size to be rejected.");

	assert!(matches!(err, Error::InvalidRequest { .. }));
}

#[tokio::test]
async fn oversized_page_size_is_clamped() {
	let mut svc = memory_service();

	svc.cfg.search.max_page_size = 5;

	let response = svc
		.search(SearchRequest { page_size: Some(50), ..Default::default() })
		.await
		.expect("search");

	assert_eq!(response.companies.len(), 5);
	assert!(response.has_next);
}

#[tokio::test]
async fn duplicate_join_rows_collapse_to_one_company() {
	let svc = service(Arc::new(directory().with_join_rows()));
	let response = svc
		.search(SearchRequest { include_facet_counts: true, ..filtered(&["CA", "TX"], &[], None) })
		.await
		.expect("search");
	let bay = names(&response).iter().filter(|name| **name == "Bay Circuit Works").count();
	let acme = names(&response).iter().filter(|name| **name == "Acme Electronics").count();

	assert_eq!(bay, 1);
	assert_eq!(acme, 1);
	assert_eq!(response.companies.len(), 8);
	assert_eq!(response.total_count, 8);
	assert!(!response.has_next);

	let facets = response.facet_counts.expect("Expected facet counts.");

	assert_eq!(facets.state("CA"), Some(5));
	assert_eq!(facets.state("TX"), Some(4));
}

#[tokio::test]
async fn capability_counts_ignore_the_capability_filter() {
	let response = memory_service()
		.search(SearchRequest { include_facet_counts: true, ..filtered(&[], &["smt"], None) })
		.await
		.expect("search");
	let facets = response.facet_counts.expect("Expected facet counts.");

	assert_eq!(response.total_count, 7);
	assert_eq!(facets.capability(CapabilitySlug::Smt), Some(7));
	assert_eq!(facets.capability(CapabilitySlug::BoxBuild), Some(5));
	assert_eq!(facets.capability(CapabilitySlug::CableHarness), Some(2));
	assert_eq!(facets.capabilities.len(), CapabilitySlug::ALL.len());
}

#[tokio::test]
async fn each_facet_counts_against_the_other_filters() {
	let svc = memory_service();
	let by_state = svc
		.search(SearchRequest { include_facet_counts: true, ..filtered(&["CA"], &[], None) })
		.await
		.expect("search")
		.facet_counts
		.expect("Expected facet counts.");

	assert_eq!(by_state.capability(CapabilitySlug::Smt), Some(4));
	assert_eq!(by_state.capability(CapabilitySlug::BoxBuild), Some(2));
	assert_eq!(by_state.capability(CapabilitySlug::ThroughHole), Some(1));
	assert_eq!(by_state.capability(CapabilitySlug::MixedTechnology), Some(0));

	let by_capability = svc
		.search(SearchRequest { include_facet_counts: true, ..filtered(&[], &["smt"], None) })
		.await
		.expect("search")
		.facet_counts
		.expect("Expected facet counts.");
	let codes: Vec<(&str, u64)> = by_capability
		.states
		.iter()
		.map(|entry| (entry.code.as_str(), entry.count))
		.collect();

	assert_eq!(codes, vec![("CA", 4), ("TX", 2), ("CO", 1), ("MN", 1)]);

	let by_states = svc
		.search(SearchRequest {
			include_facet_counts: true,
			..filtered(&["CA", "TX"], &[], Some("high"))
		})
		.await
		.expect("search")
		.facet_counts
		.expect("Expected facet counts.");

	assert_eq!(by_states.volume(VolumeLevel::Low), Some(3));
	assert_eq!(by_states.volume(VolumeLevel::Medium), Some(4));
	assert_eq!(by_states.volume(VolumeLevel::High), Some(3));
}

#[tokio::test]
async fn selected_state_without_matches_is_listed_at_zero() {
	let response = memory_service()
		.search(SearchRequest { include_facet_counts: true, ..filtered(&["CA", "NV"], &[], None) })
		.await
		.expect("search");
	let facets = response.facet_counts.expect("Expected facet counts.");

	assert_eq!(response.total_count, 5);
	assert_eq!(facets.state("NV"), Some(0));
	assert_eq!(facets.states.last().map(|entry| entry.code.as_str()), Some("NV"));
}

#[tokio::test]
async fn bbox_limits_companies_and_projected_states() {
	let response = memory_service()
		.search(SearchRequest {
			bbox: Some(west_coast()),
			include_facet_counts: true,
			..Default::default()
		})
		.await
		.expect("search");

	assert_eq!(response.total_count, 6);
	assert_eq!(
		names(&response),
		vec![
			"Acme Electronics",
			"Bay Circuit Works",
			"Cascade Assembly",
			"Evergreen Manufacturing",
			"Golden State Assembly",
			"Horizon Contract Mfg",
		]
	);

	let facets = response.facet_counts.expect("Expected facet counts.");

	assert_eq!(facets.state("CA"), Some(4));
	assert_eq!(facets.state("OR"), Some(1));
	assert_eq!(facets.state("WA"), Some(1));
	assert_eq!(facets.state("TX"), None);
}

#[tokio::test]
async fn state_and_bbox_must_hold_on_one_facility() {
	let response = memory_service()
		.search(SearchRequest { bbox: Some(west_coast()), ..filtered(&["TX"], &[], None) })
		.await
		.expect("search");

	assert_eq!(response.total_count, 0);
	assert!(response.companies.is_empty());
}

#[tokio::test]
async fn partial_bbox_is_ignored() {
	let response = memory_service()
		.search(SearchRequest {
			bbox: Some(RawBoundingBox { max_lat: None, ..west_coast() }),
			..Default::default()
		})
		.await
		.expect("search");

	assert_eq!(response.total_count, 12);
}

#[tokio::test]
async fn route_defaults_add_state_and_certification() {
	let svc = memory_service();
	let certified = svc
		.search(SearchRequest {
			route_defaults: Some(RouteDefaults {
				state: None,
				cert_slug: Some("iso-9001".to_string()),
			}),
			..Default::default()
		})
		.await
		.expect("search");

	assert_eq!(
		names(&certified),
		vec!["Acme Electronics", "Bay Circuit Works", "Horizon Contract Mfg"]
	);

	let landing = svc
		.search(SearchRequest {
			route_defaults: Some(RouteDefaults {
				state: Some("tx".to_string()),
				cert_slug: Some("as9100".to_string()),
			}),
			..filtered(&["CA"], &[], None)
		})
		.await
		.expect("search");

	assert_eq!(names(&landing), vec!["Delta PCB Solutions"]);

	let unknown = svc
		.search(SearchRequest {
			route_defaults: Some(RouteDefaults {
				state: None,
				cert_slug: Some("iso-0000".to_string()),
			}),
			..Default::default()
		})
		.await
		.expect("search");

	assert_eq!(unknown.total_count, 12);
}

#[tokio::test]
async fn unknown_capability_slugs_are_dropped() {
	let response =
		memory_service().search(filtered(&[], &["teleportation"], None)).await.expect("search");

	assert_eq!(response.total_count, 12);
}

#[tokio::test]
async fn main_query_failure_returns_an_empty_well_formed_page() {
	let store = Arc::new(FaultyStore::new(directory()).failing(StoreOp::Page));
	let svc = service(store.clone());
	let response = svc
		.search(SearchRequest { include_facet_counts: true, ..filtered(&["TX", "CA"], &[], None) })
		.await
		.expect("search");

	assert!(response.companies.is_empty());
	assert_eq!(response.total_count, 0);
	assert!(!response.has_next);
	assert!(!response.has_prev);
	assert_eq!(response.next_cursor, None);
	assert_eq!(response.prev_cursor, None);

	let facets = response.facet_counts.expect("Expected zero-valued facet counts.");
	let codes: Vec<&str> = facets.states.iter().map(|entry| entry.code.as_str()).collect();

	assert_eq!(codes, vec!["CA", "TX"]);
	assert!(facets.states.iter().all(|entry| entry.count == 0));
	assert!(facets.capabilities.iter().all(|entry| entry.count == 0));
	assert!(facets.production_volume.iter().all(|entry| entry.count == 0));
	assert_eq!(store.calls(StoreOp::Page), 1);
}

#[tokio::test]
async fn failing_facet_only_zeroes_its_own_table() {
	let store = Arc::new(FaultyStore::new(directory()).failing(StoreOp::FacilityStates));
	let svc = service(store.clone());
	let response = svc
		.search(SearchRequest { include_facet_counts: true, ..filtered(&["CA"], &[], None) })
		.await
		.expect("search");

	assert_eq!(response.total_count, 5);

	let facets = response.facet_counts.expect("Expected facet counts.");

	assert_eq!(facets.states.len(), 1);
	assert_eq!(facets.state("CA"), Some(0));
	assert_eq!(facets.capability(CapabilitySlug::Smt), Some(4));
	assert_eq!(facets.volume(VolumeLevel::Low), Some(2));
	assert_eq!(store.calls(StoreOp::CapabilityFlags), 2);
}

#[tokio::test]
async fn previous_page_lookup_failure_only_clears_has_prev() {
	let store = Arc::new(FaultyStore::new(directory()).failing(StoreOp::Preceding));
	let svc = service(store.clone());
	let first = svc
		.search(SearchRequest { page_size: Some(9), ..Default::default() })
		.await
		.expect("search");

	assert_eq!(store.calls(StoreOp::Preceding), 0);

	let second = svc
		.search(SearchRequest {
			page_size: Some(9),
			cursor: first.next_cursor,
			..Default::default()
		})
		.await
		.expect("search");

	assert_eq!(second.companies.len(), 3);
	assert!(!second.has_prev);
	assert_eq!(second.prev_cursor, None);
	assert_eq!(store.calls(StoreOp::Preceding), 1);
}

#[tokio::test]
async fn facets_are_skipped_unless_requested() {
	let store = Arc::new(FaultyStore::new(directory()));
	let svc = service(store.clone());
	let response = svc.search(filtered(&["CA"], &["smt"], None)).await.expect("search");
	let json = serde_json::to_value(&response).expect("serialize");

	assert_eq!(json["facet_counts"], serde_json::Value::Null);
	assert_eq!(store.calls(StoreOp::FacilityStates), 0);
	assert_eq!(store.calls(StoreOp::CapabilityFlags), 0);
}

#[tokio::test]
async fn company_lookup_returns_relations_or_not_found() {
	let svc = memory_service();
	let company = svc
		.company(CompanyRequest { company_id: fixtures::company_id(8) })
		.await
		.expect("company");

	assert_eq!(company.company_name, "Horizon Contract Mfg");
	assert_eq!(company.certifications.len(), 2);
	assert!(company.capabilities.as_ref().is_some_and(|caps| caps.high_volume));

	let err = svc
		.company(CompanyRequest { company_id: Uuid::from_u128(404) })
		.await
		.expect_err("Expected a missing company.");

	assert!(matches!(err, Error::NotFound { .. }));
}
