// SPDX-License-Identifier: GPL-3.0-only

//! Listings and menu picks over a recorded laptop snapshot: an NVMe drive
//! with an EFI partition, a LUKS root and swap, plus a USB stick.

use diskpick_cli::cli::ListArgs;
use diskpick_cli::commands::{self, Listing};
use diskpick_cli::format::templates;
use diskpick_cli::{Config, FormatError, OutputFormat};
use diskpick_core::{BlockMap, Importance};
use diskpick_udisks::SnapshotSource;
use indoc::indoc;
use serde_json::Value;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/system.json");

fn source() -> SnapshotSource {
    SnapshotSource::new(FIXTURE)
}

fn listing(format: &str, min_importance: Importance) -> Listing {
    Listing {
        format: OutputFormat::resolve(format, &Config::default()),
        min_importance,
    }
}

async fn map() -> BlockMap {
    commands::load_map(&source()).await.unwrap()
}

#[tokio::test]
async fn devices_are_grouped_by_drive_then_root() {
    let output = commands::blockdevs(&source(), &listing("{{ device }}", Importance::Irrelevant))
        .await
        .unwrap();

    assert_eq!(
        output,
        indoc! {"
            /dev/sdb1
            /dev/mapper/luks-root
            /dev/sda2
            /dev/sda3
            /dev/sda1"}
    );
}

#[tokio::test]
async fn importance_threshold_hides_devices() {
    let map = map().await;
    let render = |level| {
        commands::render_listing(&map, &listing("{{ device }}:{{ importance }}", level)).unwrap()
    };

    assert_eq!(
        render(Importance::Normal),
        "/dev/sdb1:3\n/dev/mapper/luks-root:1\n/dev/sda2:1\n/dev/sda1:2"
    );
    assert_eq!(render(Importance::Reduced), "/dev/sdb1:3\n/dev/sda1:2");
    assert_eq!(render(Importance::Auto), "/dev/sdb1:3");
}

#[tokio::test]
async fn unlocked_volume_shows_the_drive_of_its_container() {
    let map = map().await;
    let unlocked = map
        .get("/org/freedesktop/UDisks2/block_devices/dm_2d0")
        .unwrap();

    assert_eq!(
        unlocked.root_device(),
        "/org/freedesktop/UDisks2/block_devices/sda2"
    );

    let basic = commands::render_listing(&map, &listing("basic", Importance::Normal)).unwrap();
    assert_eq!(
        basic.lines().nth(1),
        Some("[ Samsung SSD 970 E... ] [ 10 GiB ] [ ext4 ] [ root ] [ /dev/mapper/luks-... ] ")
    );
}

#[tokio::test]
async fn tabular_lines_are_aligned() {
    let map = map().await;
    let output = commands::render_listing(&map, &listing("tabular", Importance::Normal)).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        lines[0],
        format!(
            "{:<20}   {:>7}   {:<12}   {:<15}   {}",
            "Cruzer Blade", "16 GiB", "vfat", "STICK", "/dev/sdb1"
        )
    );
    assert_eq!(
        lines[2],
        format!(
            "{:<20}   {:>7}   {:<12}   {:<15}   {}",
            "Samsung SSD 970 E...", "10 GiB", "crypto_LUKS", "-", "/dev/sda2"
        )
    );
}

#[tokio::test]
async fn json_listing_carries_resolved_fields() {
    let output = commands::blockdevs(&source(), &listing("json", Importance::Auto))
        .await
        .unwrap();
    let json: Value = serde_json::from_str(&output).unwrap();

    let devices = json.as_array().unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(
        devices[0]["ObjectPath"],
        "/org/freedesktop/UDisks2/block_devices/sdb1"
    );
    assert_eq!(
        devices[0]["RootDevice"],
        "/org/freedesktop/UDisks2/block_devices/sdb1"
    );
    assert_eq!(devices[0]["PreferredSize"], 17179869184_u64);
    assert_eq!(devices[0]["RootDrive"]["Vendor"], "SanDisk");
    assert!(devices[0]["HintSystem"].is_null());
}

#[tokio::test]
async fn menu_selection_maps_back_to_its_device() {
    let command: Vec<String> = ["sed", "-n", "2p"].map(String::from).to_vec();

    let picked = commands::pick(&source(), &listing("rofi", Importance::Normal), &command)
        .await
        .unwrap();
    let json: Value = serde_json::from_str(&picked).unwrap();

    assert_eq!(
        json["ObjectPath"],
        "/org/freedesktop/UDisks2/block_devices/dm_2d0"
    );
    assert_eq!(json["IdLabel"], "root");
}

#[tokio::test]
async fn menu_rejects_ambiguous_and_json_formats() {
    let command: Vec<String> = vec!["cat".to_string()];

    let err = commands::pick(&source(), &listing("{{ id_type }}", Importance::Normal), &command)
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FormatError>(),
        Some(FormatError::DuplicateLine(line)) if line == "vfat"
    ));

    assert!(
        commands::pick(&source(), &listing("json", Importance::Normal), &command)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn menu_selection_outside_the_list_is_an_error() {
    let command: Vec<String> = ["echo", "/dev/sdz9"].map(String::from).to_vec();

    let err = commands::pick(&source(), &listing("{{ device }}", Importance::Irrelevant), &command)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("/dev/sdz9"));
}

#[test]
fn flags_override_config_values() {
    let config = Config::parse(
        std::path::Path::new("config.toml"),
        indoc! {r#"
            min_importance = 2
            format = "compact"

            [formats]
            compact = "{{ device }} {{ id_label }}"
        "#},
    )
    .unwrap();

    let from_config = Listing::from_args(
        &ListArgs {
            format: None,
            min_importance: None,
            snapshot: None,
        },
        &config,
        &config.format,
    )
    .unwrap();
    assert_eq!(from_config.min_importance, Importance::Reduced);
    assert_eq!(
        from_config.format,
        OutputFormat::Template("{{ device }} {{ id_label }}".to_string())
    );

    let from_flags = Listing::from_args(
        &ListArgs {
            format: Some("basic".to_string()),
            min_importance: Some(0),
            snapshot: None,
        },
        &config,
        &config.format,
    )
    .unwrap();
    assert_eq!(from_flags.min_importance, Importance::Irrelevant);
    assert_eq!(
        from_flags.format,
        OutputFormat::Template(templates::BASIC.to_string())
    );

    assert!(
        Listing::from_args(
            &ListArgs {
                format: None,
                min_importance: Some(4),
                snapshot: None,
            },
            &config,
            &config.format,
        )
        .is_err()
    );
}
