use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;

use fitsynth_cli::app::run;
use fitsynth_cli::config::Config;
use fitsynth_core::GeneratorConfig;

const TABLES: [&str; 4] = [
    "users.csv",
    "events.csv",
    "sessions.csv",
    "subscriptions.csv",
];

fn one_day_config(root: &Path, installs: u32) -> Config {
    let day = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
    Config {
        out_dir: root.join("fitness_synthetic").to_string_lossy().into_owned(),
        archive_path: root
            .join("fitness_synthetic.zip")
            .to_string_lossy()
            .into_owned(),
        generator: GeneratorConfig {
            seed: 42,
            start_date: day,
            end_date: day,
            installs_first_day: installs,
            installs_last_day: installs,
        },
    }
}

fn data_rows(path: &Path) -> usize {
    let mut rdr = csv::Reader::from_path(path).expect("open csv");
    rdr.records().count()
}

#[test]
fn run_writes_four_tables_and_archive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = one_day_config(dir.path(), 300);

    let summary = run(&cfg).expect("run");
    assert_eq!(summary.dataset.users, 300);
    assert_eq!(summary.seed, 42);

    let out = Path::new(&cfg.out_dir);
    for table in TABLES {
        assert!(out.join(table).is_file(), "{table} missing");
    }
    assert_eq!(data_rows(&out.join("users.csv")), 300);
    assert_eq!(data_rows(&out.join("events.csv")), summary.dataset.events);
    assert_eq!(data_rows(&out.join("sessions.csv")), summary.dataset.sessions);
    assert_eq!(
        data_rows(&out.join("subscriptions.csv")),
        summary.dataset.subscriptions
    );

    let headers = csv::Reader::from_path(out.join("users.csv"))
        .expect("open")
        .headers()
        .expect("headers")
        .clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "user_id",
            "install_date",
            "age",
            "gender",
            "acquisition_channel",
            "device_type",
            "country",
            "segment"
        ]
    );

    let mut zip =
        zip::ZipArchive::new(File::open(&cfg.archive_path).expect("archive")).expect("zip");
    let names: Vec<String> = (0..zip.len())
        .map(|i| zip.by_index(i).expect("entry").name().to_string())
        .collect();
    assert_eq!(names, TABLES);
}

#[test]
fn same_seed_writes_identical_files() {
    let first = tempfile::tempdir().expect("tempdir");
    let second = tempfile::tempdir().expect("tempdir");
    let a = one_day_config(first.path(), 120);
    let b = one_day_config(second.path(), 120);
    run(&a).expect("run a");
    run(&b).expect("run b");

    for table in TABLES {
        let left = std::fs::read(Path::new(&a.out_dir).join(table)).expect("read a");
        let right = std::fs::read(Path::new(&b.out_dir).join(table)).expect("read b");
        assert_eq!(left, right, "{table} differs between identical runs");
    }
}

#[test]
fn subscription_prices_on_disk_match_plan() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = one_day_config(dir.path(), 1_000);
    run(&cfg).expect("run");

    let mut rdr =
        csv::Reader::from_path(Path::new(&cfg.out_dir).join("subscriptions.csv")).expect("open");
    let mut seen = 0;
    for record in rdr.records() {
        let record = record.expect("record");
        match &record[2] {
            "monthly" => assert_eq!(&record[3], "9.99"),
            "yearly" => assert_eq!(&record[3], "79.99"),
            other => panic!("unexpected plan {other}"),
        }
        seen += 1;
    }
    assert!(seen > 0);
}

#[test]
fn unwritable_output_dir_aborts_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").expect("write");

    let mut cfg = one_day_config(dir.path(), 10);
    cfg.out_dir = blocker.join("out").to_string_lossy().into_owned();

    let err = run(&cfg).expect_err("output dir under a file");
    assert!(err.to_string().contains("blocker"), "{err}");
    assert!(!Path::new(&cfg.archive_path).exists());
}
