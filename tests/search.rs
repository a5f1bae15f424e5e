use chrono::NaiveDate;
use diesel::prelude::*;
use property_catalog::domain::filter::FilterSpec;
use property_catalog::domain::property::Property;
use property_catalog::domain::types::{PropertyId, PropertyType};
use property_catalog::models::property::NewProperty as DbNewProperty;
use property_catalog::repository::{DieselRepository, PropertyWriter};
use property_catalog::schema::properties;
use property_catalog::services::property::{
    create_property, delete_property, get_property, list_properties, search_properties,
    update_property,
};

mod common;

/// Seeds four listings, oldest first, and returns them in creation order.
fn seed_catalog(repo: &DieselRepository) -> Vec<Property> {
    let listings = [
        (
            "Luxury Downtown Apartment",
            "123 Main St, New York",
            850000.0,
            PropertyType::Apartment,
        ),
        (
            "Beautiful House",
            "789 Oak Ave, Los Angeles",
            1200000.0,
            PropertyType::House,
        ),
        (
            "Seaside Condo",
            "45 Ocean Drive, Miami",
            650000.0,
            PropertyType::Condo,
        ),
        (
            "Quiet Townhouse",
            "9 Maple Court, Austin",
            450000.0,
            PropertyType::Townhouse,
        ),
    ];

    listings
        .into_iter()
        .map(|(name, address, price, kind)| {
            common::tick();
            repo.create_property(&common::listing(name, address, price, kind))
                .unwrap()
        })
        .collect()
}

fn ids(items: &[Property]) -> Vec<PropertyId> {
    items.iter().map(|p| p.id).collect()
}

#[test]
fn test_price_range_selects_matching_listings() {
    let test_db = common::TestDb::new("test_price_range_selects_matching_listings.db");
    let repo = DieselRepository::new(test_db.pool());
    let seeded = seed_catalog(&repo);

    let spec = FilterSpec::new()
        .min_price(500000.0)
        .max_price(900000.0)
        .paginate(1, 10);
    let page = search_properties(&repo, &spec).unwrap();

    assert_eq!(page.total_count, 2);
    // Condo was created after the apartment, so it comes first.
    assert_eq!(ids(&page.items), vec![seeded[2].id, seeded[0].id]);
}

#[test]
fn test_second_page_holds_older_listings() {
    let test_db = common::TestDb::new("test_second_page_holds_older_listings.db");
    let repo = DieselRepository::new(test_db.pool());
    let seeded = seed_catalog(&repo);

    let page = search_properties(&repo, &FilterSpec::new().paginate(2, 2)).unwrap();

    assert_eq!(page.total_count, 4);
    assert_eq!(ids(&page.items), vec![seeded[1].id, seeded[0].id]);
    assert!(page.has_previous());
    assert!(!page.has_next());
    assert_eq!(page.pages(), vec![Some(1), Some(2)]);
}

#[test]
fn test_results_are_newest_first() {
    let test_db = common::TestDb::new("test_results_are_newest_first.db");
    let repo = DieselRepository::new(test_db.pool());
    let seeded = seed_catalog(&repo);

    let page = search_properties(&repo, &FilterSpec::new()).unwrap();
    let mut expected = ids(&seeded);
    expected.reverse();
    assert_eq!(ids(&page.items), expected);
}

#[test]
fn test_total_count_ignores_page_window() {
    let test_db = common::TestDb::new("test_total_count_ignores_page_window.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);

    for (number, size) in [(1, 1), (2, 3), (3, 2), (9, 100)] {
        let page = search_properties(&repo, &FilterSpec::new().paginate(number, size)).unwrap();
        assert_eq!(page.total_count, 4);
        assert!(page.items.len() <= size as usize);
    }

    let beyond = search_properties(&repo, &FilterSpec::new().paginate(5, 1)).unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_count, 4);
}

#[test]
fn test_out_of_range_pagination_is_clamped() {
    let test_db = common::TestDb::new("test_out_of_range_pagination_is_clamped.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);

    let pairs = [((0, 2), (1, 2)), ((-4, 2), (1, 2)), ((1, 0), (1, 10)), ((1, 500), (1, 100))];
    for ((raw_number, raw_size), (number, size)) in pairs {
        let raw = search_properties(&repo, &FilterSpec::new().paginate(raw_number, raw_size))
            .unwrap();
        let clamped =
            search_properties(&repo, &FilterSpec::new().paginate(number, size)).unwrap();
        assert_eq!(raw, clamped);
    }
}

#[test]
fn test_text_filters_are_case_insensitive_substrings() {
    let test_db = common::TestDb::new("test_text_filters_are_case_insensitive_substrings.db");
    let repo = DieselRepository::new(test_db.pool());
    let seeded = seed_catalog(&repo);
    let house = seeded[1].id;

    for needle in ["beaut", "HOUSE", "Beautiful House"] {
        let page = search_properties(&repo, &FilterSpec::new().name(needle)).unwrap();
        assert!(ids(&page.items).contains(&house), "needle {needle}");
    }

    let by_address = search_properties(&repo, &FilterSpec::new().address("oak ave")).unwrap();
    assert_eq!(ids(&by_address.items), vec![house]);

    let blank = search_properties(&repo, &FilterSpec::new().name("   ")).unwrap();
    assert_eq!(blank.total_count, 4);
}

#[test]
fn test_wildcard_characters_match_literally() {
    let test_db = common::TestDb::new("test_wildcard_characters_match_literally.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);
    let promo = repo
        .create_property(&common::listing(
            "Loft 50%_off",
            "1 Sale Street",
            99000.0,
            PropertyType::Commercial,
        ))
        .unwrap();

    let page = search_properties(&repo, &FilterSpec::new().name("%_")).unwrap();
    assert_eq!(ids(&page.items), vec![promo.id]);

    let underscore = search_properties(&repo, &FilterSpec::new().name("_")).unwrap();
    assert_eq!(underscore.total_count, 1);
}

#[test]
fn test_type_and_availability_filters_combine() {
    let test_db = common::TestDb::new("test_type_and_availability_filters_combine.db");
    let repo = DieselRepository::new(test_db.pool());
    let seeded = seed_catalog(&repo);

    let mut sold = seeded[2].to_new_property();
    sold.is_available = false;
    update_property(&repo, &seeded[2].id.to_string(), &sold)
        .unwrap()
        .unwrap();

    let condos = search_properties(&repo, &FilterSpec::new().property_type("condo")).unwrap();
    assert_eq!(ids(&condos.items), vec![seeded[2].id]);

    let available_condos = search_properties(
        &repo,
        &FilterSpec::new().property_type("Condo").available(true),
    )
    .unwrap();
    assert_eq!(available_condos.total_count, 0);

    let unavailable = search_properties(&repo, &FilterSpec::new().available(false)).unwrap();
    assert_eq!(ids(&unavailable.items), vec![seeded[2].id]);
}

#[test]
fn test_unknown_type_drops_only_that_constraint() {
    let test_db = common::TestDb::new("test_unknown_type_drops_only_that_constraint.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);

    let everything = search_properties(&repo, &FilterSpec::new().property_type("Castle")).unwrap();
    assert_eq!(everything.total_count, 4);

    let cheap = search_properties(
        &repo,
        &FilterSpec::new().property_type("Castle").max_price(700000.0),
    )
    .unwrap();
    assert_eq!(cheap.total_count, 2);
}

#[test]
fn test_price_bounds_are_inclusive() {
    let test_db = common::TestDb::new("test_price_bounds_are_inclusive.db");
    let repo = DieselRepository::new(test_db.pool());
    let seeded = seed_catalog(&repo);

    let exact = search_properties(
        &repo,
        &FilterSpec::new().min_price(650000.0).max_price(650000.0),
    )
    .unwrap();
    assert_eq!(ids(&exact.items), vec![seeded[2].id]);

    let page = search_properties(&repo, &FilterSpec::new().min_price(850000.0)).unwrap();
    assert!(page.items.iter().all(|p| p.price.as_amount() >= 850000.0));
    assert_eq!(page.total_count, 2);
}

#[test]
fn test_listing_view_and_lifecycle() {
    let test_db = common::TestDb::new("test_listing_view_and_lifecycle.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = create_property(
        &repo,
        &common::listing("Hilltop Retreat", "77 Summit Road", 540000.5, PropertyType::House),
    )
    .unwrap();
    let id = created.id.to_string();

    let summary = list_properties(&repo, &FilterSpec::new()).unwrap();
    assert_eq!(summary.items[0].id, id);
    assert_eq!(summary.items[0].price, 540000.5);

    assert_eq!(get_property(&repo, &id).unwrap(), Some(created));
    assert_eq!(get_property(&repo, "definitely-not-an-id").unwrap(), None);

    assert!(delete_property(&repo, &id).unwrap());
    assert!(!delete_property(&repo, &id).unwrap());
    assert_eq!(get_property(&repo, &id).unwrap(), None);
}

#[test]
fn test_text_filters_fold_non_ascii_case() {
    let test_db = common::TestDb::new("test_text_filters_fold_non_ascii_case.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);
    let clinic = repo
        .create_property(&common::listing(
            "Ärzte Haus Zürich",
            "Bahnhofstraße 1, Zürich",
            2100000.0,
            PropertyType::Commercial,
        ))
        .unwrap();

    for needle in ["ärzte", "ÄRZTE", "zÜrich"] {
        let page = search_properties(&repo, &FilterSpec::new().name(needle)).unwrap();
        assert_eq!(ids(&page.items), vec![clinic.id], "needle {needle}");
        assert!(FilterSpec::new().name(needle).filter().matches(&clinic));
    }

    let by_address =
        search_properties(&repo, &FilterSpec::new().address("BAHNHOFSTRAẞE")).unwrap();
    assert_eq!(ids(&by_address.items), vec![clinic.id]);
}

#[test]
fn test_sub_cent_price_bounds_stay_inclusive() {
    let test_db = common::TestDb::new("test_sub_cent_price_bounds_stay_inclusive.db");
    let repo = DieselRepository::new(test_db.pool());
    let studio = repo
        .create_property(&common::listing(
            "Compact Studio",
            "8 Side Street",
            100.0,
            PropertyType::Apartment,
        ))
        .unwrap();

    let above = search_properties(&repo, &FilterSpec::new().min_price(100.004)).unwrap();
    assert_eq!(above.total_count, 0);

    let below = search_properties(&repo, &FilterSpec::new().max_price(99.996)).unwrap();
    assert_eq!(below.total_count, 0);

    let around = search_properties(
        &repo,
        &FilterSpec::new().min_price(99.996).max_price(100.004),
    )
    .unwrap();
    assert_eq!(ids(&around.items), vec![studio.id]);
}

#[test]
fn test_equal_timestamps_order_by_id_across_pages() {
    let test_db = common::TestDb::new("test_equal_timestamps_order_by_id_across_pages.db");
    let pool = test_db.pool();
    let repo = DieselRepository::new(pool.clone());

    let stamped = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let listing = common::listing(
        "Twin Bungalow",
        "4 Same Day Road",
        300000.0,
        PropertyType::House,
    );

    let mut conn = pool.get().unwrap();
    let mut tied: Vec<PropertyId> = (0..5).map(|_| PropertyId::new()).collect();
    for id in &tied {
        diesel::insert_into(properties::table)
            .values(&DbNewProperty::new(*id, &listing, stamped))
            .execute(&mut conn)
            .unwrap();
    }
    drop(conn);
    tied.sort_by_key(|id| id.to_string());

    let newest = repo.create_property(&listing).unwrap();

    let mut seen = Vec::new();
    for page_number in 1..=3 {
        let page =
            search_properties(&repo, &FilterSpec::new().paginate(page_number, 2)).unwrap();
        assert_eq!(page.total_count, 6);
        seen.extend(ids(&page.items));
    }

    let mut expected = vec![newest.id];
    expected.extend(tied);
    assert_eq!(seen, expected);
}

#[test]
fn test_text_filters_ignore_surrounding_whitespace() {
    let test_db = common::TestDb::new("test_text_filters_ignore_surrounding_whitespace.db");
    let repo = DieselRepository::new(test_db.pool());
    let seeded = seed_catalog(&repo);

    let page = search_properties(&repo, &FilterSpec::new().name(" Beaut")).unwrap();
    assert_eq!(ids(&page.items), vec![seeded[1].id]);

    let condos = search_properties(&repo, &FilterSpec::new().property_type(" CONDO ")).unwrap();
    assert_eq!(ids(&condos.items), vec![seeded[2].id]);
}
