mod common;

use std::sync::Arc;

use common::resolver_with;
use tokio::sync::broadcast::error::TryRecvError;
use transaction_entry::{
    core::{
        normalize_category_value,
        services::{category_resolver::fallback_color, CategoryEvent, CategoryResolver, CommitOutcome},
    },
    domain::{default_categories, Category, CategoryColorMap, DEFAULT_CATEGORIES},
    storage::{CategoryStore, InMemoryCategoryStore, StoreWrite},
};

#[test]
fn every_default_value_resolves_to_its_label() {
    let (resolver, _store) = resolver_with(Vec::new());
    for (value, label) in DEFAULT_CATEGORIES {
        assert_eq!(resolver.resolve_label_from_selection(value).unwrap(), label);
    }
}

#[test]
fn unknown_slug_is_title_cased() {
    let (resolver, _store) = resolver_with(Vec::new());
    assert_eq!(
        resolver
            .resolve_label_from_selection("minha-nova-categoria")
            .unwrap(),
        "Minha Nova Categoria"
    );
    assert_eq!(resolver.resolve_label_from_selection("").unwrap(), "");
}

#[test]
fn custom_slug_resolves_to_stored_label() {
    let (resolver, _store) = resolver_with(vec![
        Category::new("viagem-europa", "Viagem à Europa").with_color("bg-cyan-500")
    ]);
    assert_eq!(
        resolver.resolve_label_from_selection("viagem-europa").unwrap(),
        "Viagem à Europa"
    );
}

#[test]
fn color_for_default_label_is_stable() {
    let (resolver, _store) = resolver_with(Vec::new());
    let first = resolver.resolve_color_for_label("Salário").unwrap();
    for _ in 0..5 {
        assert_eq!(resolver.resolve_color_for_label("Salário").unwrap(), first);
    }
}

#[test]
fn unknown_label_gets_fallback_color() {
    let (resolver, _store) = resolver_with(Vec::new());
    assert_eq!(
        resolver.resolve_color_for_label("Academia").unwrap(),
        fallback_color("Academia")
    );
    // Anagrams share a fallback color.
    assert_eq!(fallback_color("amor"), fallback_color("roma"));
}

#[test]
fn committing_a_new_label_creates_one_category() {
    let (resolver, store) = resolver_with(Vec::new());
    let mut events = resolver.subscribe();

    let outcome = resolver.commit_category("Viagem").unwrap();

    let expected_color = fallback_color("Viagem").to_string();
    let expected = Category::new(normalize_category_value("Viagem"), "Viagem")
        .with_color(expected_color.clone());
    assert_eq!(outcome, CommitOutcome::Created(expected.clone()));
    assert_eq!(
        store.writes(),
        vec![
            StoreWrite::AddCategory(expected.clone()),
            StoreWrite::SaveColor {
                label: "Viagem".into(),
                color: expected_color,
            },
        ]
    );
    assert_eq!(events.try_recv().unwrap(), CategoryEvent::Created(expected));
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[test]
fn committing_a_default_label_writes_nothing() {
    let (resolver, store) = resolver_with(Vec::new());
    let mut events = resolver.subscribe();

    assert_eq!(
        resolver.commit_category("Salário").unwrap(),
        CommitOutcome::DefaultCategory
    );
    assert!(store.writes().is_empty());
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[test]
fn blank_label_is_ignored() {
    let (resolver, store) = resolver_with(Vec::new());
    assert_eq!(resolver.commit_category("   ").unwrap(), CommitOutcome::Empty);
    assert!(store.writes().is_empty());
}

#[test]
fn committing_twice_is_idempotent() {
    let (resolver, store) = resolver_with(Vec::new());
    resolver.commit_category("Viagem").unwrap();
    store.clear_writes();
    let mut events = resolver.subscribe();

    assert_eq!(
        resolver.commit_category("Viagem").unwrap(),
        CommitOutcome::Unchanged
    );
    assert!(store.writes().is_empty());
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[test]
fn case_variants_share_one_category() {
    let (resolver, store) = resolver_with(Vec::new());
    resolver.commit_category("Viagem").unwrap();
    resolver.commit_category("viagem").unwrap();
    resolver.commit_category("  VIAGEM ").unwrap();

    let categories = store.load_custom_categories().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].label, "Viagem");
}

#[test]
fn stale_color_is_refreshed_from_color_table() {
    let mut colors = CategoryColorMap::new();
    colors.insert("Viagem".into(), "bg-indigo-500".into());
    let store = Arc::new(
        InMemoryCategoryStore::with_categories(vec![
            Category::new("viagem", "Viagem").with_color("bg-red-500"),
            Category::new("pets", "Pets").with_color("bg-lime-500"),
        ])
        .with_colors(colors),
    );
    let resolver = CategoryResolver::new(store.clone());
    let mut events = resolver.subscribe();

    let outcome = resolver.commit_category("Viagem").unwrap();

    assert_eq!(
        outcome,
        CommitOutcome::Recolored(Category::new("viagem", "Viagem").with_color("bg-indigo-500"))
    );
    let stored = store.load_custom_categories().unwrap();
    assert_eq!(stored[0].color.as_deref(), Some("bg-indigo-500"));
    assert_eq!(stored[1].color.as_deref(), Some("bg-lime-500"));
    assert_eq!(store.writes().len(), 2);
    assert_eq!(
        events.try_recv().unwrap(),
        CategoryEvent::Recolored {
            label: "Viagem".into(),
            color: "bg-indigo-500".into(),
        }
    );
}

#[test]
fn case_variant_reuses_stored_color_over_color_table() {
    let mut colors = CategoryColorMap::new();
    colors.insert("Viagem".into(), "bg-indigo-500".into());
    let store = Arc::new(
        InMemoryCategoryStore::with_categories(vec![
            Category::new("viagem", "Viagem").with_color("bg-red-500")
        ])
        .with_colors(colors),
    );
    let resolver = CategoryResolver::new(store.clone());

    // No exact color-table key for the lower-cased label, so the stored color wins.
    assert_eq!(
        resolver.commit_category("viagem").unwrap(),
        CommitOutcome::Unchanged
    );
    assert!(store.writes().is_empty());
}

#[test]
fn custom_category_without_color_gets_one() {
    let (resolver, store) = resolver_with(vec![Category::new("pets", "Pets")]);

    let outcome = resolver.commit_category("Pets").unwrap();

    let color = fallback_color("Pets").to_string();
    assert_eq!(
        outcome,
        CommitOutcome::Recolored(Category::new("pets", "Pets").with_color(color.clone()))
    );
    assert_eq!(
        store.load_custom_category_colors().unwrap().get("Pets"),
        Some(&color)
    );
}

#[test]
fn lowercase_default_label_is_persisted_with_colliding_slug() {
    // Default keys are matched by exact label, so a lower-cased variant is
    // stored as custom and ends up sharing the default's slug.
    let (resolver, store) = resolver_with(Vec::new());

    let outcome = resolver.commit_category("salário").unwrap();

    let category = match outcome {
        CommitOutcome::Created(category) => category,
        other => panic!("expected a new custom category, got {other:?}"),
    };
    assert_eq!(category.value, "salario");
    assert!(default_categories().iter().any(|c| c.value == category.value));
    assert_eq!(store.load_custom_categories().unwrap().len(), 1);
}

#[test]
fn selection_for_stored_label_prefers_existing_slug() {
    let (resolver, _store) =
        resolver_with(vec![Category::new("viagem-2024", "Viagem").with_color("bg-blue-500")]);
    assert_eq!(
        resolver.resolve_selection_from_label("viagem").unwrap().as_deref(),
        Some("viagem-2024")
    );
    assert_eq!(
        resolver.resolve_selection_from_label("Educação").unwrap().as_deref(),
        Some("educacao")
    );
}
