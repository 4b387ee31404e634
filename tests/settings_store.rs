use blackjack_rs::money::Money;
use blackjack_rs::player::Seat;
use blackjack_rs::settings::GameSettings;
use blackjack_rs::storage::{BankrollStore, JsonFileStore, MemoryStore, SettingsStore};
use blackjack_rs::tui::app::AppState;
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("blackjack-rs-{}-{name}.json", std::process::id()));
    let _ = fs::remove_file(&path);
    path
}

#[test]
fn json_store_round_trips() {
    let path = temp_path("round-trip");
    let mut store = JsonFileStore::new(&path);
    let mut settings = GameSettings::default();
    settings.table_min = Money::from_dollars(10);
    settings.number_of_decks = 8;
    settings.dealer_hits_soft_17 = false;

    store.save_settings(&settings).unwrap();
    store.save_bankroll(Money::from_cents(123_450)).unwrap();

    let reopened = JsonFileStore::new(&path);
    assert_eq!(reopened.load_settings(), settings);
    assert_eq!(reopened.load_bankroll(Money::ZERO), Money::from_cents(123_450));

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(doc.get("bankroll").is_some());
    assert!(doc.get("settings").is_some());
    let _ = fs::remove_file(&path);
}

#[test]
fn missing_file_loads_defaults() {
    let store = JsonFileStore::new(temp_path("missing"));
    assert_eq!(store.load_settings(), GameSettings::default());
    assert_eq!(store.load_bankroll(Money::from_dollars(1000)), Money::from_dollars(1000));
}

#[test]
fn corrupt_file_is_replaced_on_save() {
    let path = temp_path("corrupt");
    fs::write(&path, "{ not json").unwrap();
    let mut store = JsonFileStore::new(&path);
    assert_eq!(store.load_bankroll(Money::from_dollars(7)), Money::from_dollars(7));
    store.save_bankroll(Money::from_dollars(50)).unwrap();
    assert_eq!(store.load_bankroll(Money::ZERO), Money::from_dollars(50));
    let _ = fs::remove_file(&path);
}

#[test]
fn saving_one_half_keeps_the_other() {
    let path = temp_path("halves");
    let mut store = JsonFileStore::new(&path);
    let mut settings = GameSettings::default();
    settings.max_splits = 1;
    store.save_settings(&settings).unwrap();
    store.save_bankroll(Money::from_dollars(640)).unwrap();
    assert_eq!(store.load_settings().max_splits, 1);
    let _ = fs::remove_file(&path);
}

#[test]
fn app_loads_saved_settings_and_bankroll() {
    let mut store = MemoryStore::new();
    let mut settings = GameSettings::default();
    settings.table_min = Money::from_dollars(25);
    settings.table_max = Money::from_dollars(1000);
    store.save_settings(&settings).unwrap();
    store.save_bankroll(Money::from_dollars(333)).unwrap();

    let app = AppState::with_store(Box::new(store));
    assert_eq!(app.table.settings().table_min, Money::from_dollars(25));
    assert_eq!(app.cfg, settings);
    assert_eq!(app.human().unwrap().bankroll(), Money::from_dollars(333));
    assert_eq!(app.human().unwrap().seat(), Seat::new(1).unwrap());
}

#[test]
fn broke_bankroll_restarts_from_the_starting_amount() {
    let mut store = MemoryStore::new();
    store.save_bankroll(Money::from_dollars(2)).unwrap();
    let app = AppState::with_store(Box::new(store));
    assert_eq!(app.human().unwrap().bankroll(), GameSettings::default().starting_bankroll);
}
