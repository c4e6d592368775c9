mod common;
use caseboard::config::{BarAxis, Config, DefaultSelection};
use caseboard::core::aggregate::AxisHint;
use caseboard::core::bucketizer::Bucketizer;
use caseboard::core::coerce::coerce_column;
use caseboard::core::deriver::{day_difference, derive};
use caseboard::core::pipeline::analyze;
use caseboard::core::selection::{ColumnSelection, SelectionOverrides, resolve};
use caseboard::models::bucket::{Bucket, NegativePolicy};
use caseboard::models::metric::{ColumnPair, Metric};
use chrono::NaiveDate;
use common::{default_bucketizer, sample_table};

fn default_selection() -> ColumnSelection {
    resolve(
        &sample_table(),
        &DefaultSelection::default(),
        &SelectionOverrides::default(),
    )
    .unwrap()
}

fn label(b: &Bucketizer, v: i64) -> String {
    b.bucket(Some(v)).unwrap().label()
}

#[test]
fn test_durations_with_default_selection() {
    let table = sample_table();
    let d = derive(&table, &default_selection()).unwrap();

    assert_eq!(d.plusone, vec![Some(5), Some(0), Some(-9), None, Some(1)]);
    assert_eq!(d.gustave, vec![Some(3), Some(60), Some(1), Some(15), Some(59)]);
}

#[test]
fn test_time_of_day_is_truncated() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(23, 59, 0);
    let end = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 1, 0);
    assert_eq!(day_difference(start, end), Some(1));

    let later_same_day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(1, 0, 0);
    assert_eq!(day_difference(start, later_same_day), Some(0));
    assert_eq!(day_difference(None, end), None);
    assert_eq!(day_difference(start, None), None);
}

#[test]
fn test_recoercion_does_not_change_durations() {
    let mut table = sample_table();
    let selection = default_selection();
    let before = derive(&table, &selection).unwrap();

    for col in ["submit_history_date", "first_sent_to_expert_date", "final_opinion_date"] {
        assert!(coerce_column(&mut table, col));
    }

    assert_eq!(derive(&table, &selection).unwrap(), before);
}

#[test]
fn test_same_column_gives_zero() {
    let table = sample_table();
    let selection = ColumnSelection {
        plusone: ColumnPair::new("submit_history_date", "submit_history_date"),
        gustave: ColumnPair::new("close_date", "close_date"),
    };
    let d = derive(&table, &selection).unwrap();

    assert_eq!(d.plusone, vec![Some(0), Some(0), Some(0), None, Some(0)]);
    assert_eq!(d.gustave, vec![Some(0), None, None, None, None]);
}

#[test]
fn test_non_date_column_yields_missing() {
    let table = sample_table();
    let selection = ColumnSelection {
        plusone: ColumnPair::new("notes", "close_date"),
        gustave: ColumnPair::new("name", "final_opinion_date"),
    };
    let d = derive(&table, &selection).unwrap();

    assert!(d.plusone.iter().all(Option::is_none));
    assert!(d.gustave.iter().all(Option::is_none));
}

#[test]
fn test_bucket_edges() {
    let b = default_bucketizer();

    assert_eq!(label(&b, 0), "0-4 days");
    assert_eq!(label(&b, 4), "0-4 days");
    assert_eq!(label(&b, 5), "5-9 days");
    assert_eq!(label(&b, 49), "45-49 days");
    assert_eq!(label(&b, 50), "50+ days");
    assert_eq!(label(&b, 365), "50+ days");
    assert_eq!(label(&b, -9), "<0 days");
    assert_eq!(b.bucket(None), None);
}

#[test]
fn test_negative_policy_missing() {
    let b = default_bucketizer().with_negative_policy(NegativePolicy::Missing);

    assert_eq!(b.bucket(Some(-1)), None);
    assert_eq!(b.bucket(Some(0)), Some(Bucket::Range { lo: 0, hi: 4 }));
    assert!(!b.labels().contains(&Bucket::Negative));
}

#[test]
fn test_buckets_are_monotonic() {
    let b = default_bucketizer();
    let labels = b.labels();
    assert_eq!(labels.len(), 12);

    let mut previous = None;
    for v in -3..80 {
        let bucket = b.bucket(Some(v)).unwrap();
        assert!(labels.contains(&bucket), "{v} → {bucket}");
        if let Some(p) = previous {
            assert!(p <= bucket, "{v}: {p} should not follow {bucket}");
        }
        previous = Some(bucket);
    }
}

#[test]
fn test_custom_partition() {
    let b = Bucketizer::new(7, 2, NegativePolicy::Bucket).unwrap();
    assert_eq!(label(&b, 6), "0-6 days");
    assert_eq!(label(&b, 13), "7-13 days");
    assert_eq!(label(&b, 14), "14+ days");

    assert!(Bucketizer::new(0, 10, NegativePolicy::Bucket).is_err());
    assert!(Bucketizer::new(5, 0, NegativePolicy::Bucket).is_err());
}

#[test]
fn test_oversized_partition_is_rejected() {
    let huge_width = i64::MAX / 2 + 1;
    assert!(Bucketizer::new(huge_width, 3, NegativePolicy::Bucket).is_err());
    assert!(Bucketizer::new(1, 1_000_000, NegativePolicy::Bucket).is_err());
    assert!(Bucketizer::new(1, 1000, NegativePolicy::Bucket).is_ok());

    let mut cfg = Config::default();
    cfg.buckets.width = huge_width;
    cfg.buckets.count = 3;
    assert!(cfg.validate().is_err());

    let mut cfg = Config::default();
    cfg.buckets.count = i64::MAX;
    assert!(cfg.validate().is_err());
}

#[test]
fn test_bar_axis_span_must_fit() {
    let mut cfg = Config::default();
    cfg.bar_axis = BarAxis {
        min: i64::MIN,
        max: i64::MAX,
        tick: 5,
    };
    assert!(cfg.validate().is_err());

    let inverted = AxisHint {
        min: 10,
        max: 0,
        tick: 5,
    };
    assert_eq!(inverted.span(), 0);
}

#[test]
fn test_analysis_rows_and_pies() {
    let table = sample_table();
    let cfg = Config::default();
    let analysis = analyze(&table, &default_selection(), &cfg, &default_bucketizer()).unwrap();

    let names: Vec<&str> = analysis.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C", "D", "E"]);

    let a = &analysis.rows[0];
    assert_eq!(a.plusone_bucket, Some(Bucket::Range { lo: 5, hi: 9 }));
    assert_eq!(a.gustave_bucket, Some(Bucket::Range { lo: 0, hi: 4 }));
    assert_eq!(analysis.rows[2].plusone_bucket, Some(Bucket::Negative));
    assert_eq!(analysis.rows[3].plusone_time, None);
    assert_eq!(analysis.rows[3].plusone_bucket, None);

    let plusone = analysis.pie(Metric::PlusOne).unwrap();
    assert_eq!(plusone.total, 4);
    assert_eq!(plusone.excluded, 1);
    assert_eq!(plusone.count(&Bucket::Range { lo: 0, hi: 4 }), 2);
    assert_eq!(plusone.count(&Bucket::Range { lo: 5, hi: 9 }), 1);
    assert_eq!(plusone.count(&Bucket::Negative), 1);
    assert_eq!(plusone.slices.iter().map(|s| s.count).sum::<usize>(), 4);

    let gustave = analysis.pie(Metric::Gustave).unwrap();
    assert_eq!(gustave.total, 5);
    assert_eq!(gustave.excluded, 0);
    assert_eq!(gustave.count(&Bucket::Overflow { from: 50 }), 2);
    assert_eq!(gustave.count(&Bucket::Range { lo: 15, hi: 19 }), 1);
}

#[test]
fn test_pie_counts_match_bucketed_rows() {
    let table = sample_table();
    let cfg = Config::default();
    let analysis = analyze(&table, &default_selection(), &cfg, &default_bucketizer()).unwrap();

    for metric in Metric::ALL {
        let pie = analysis.pie(metric).unwrap();
        let bucketed = analysis.rows.iter().filter(|r| r.bucket(metric).is_some()).count();
        assert_eq!(pie.total, bucketed);
        assert_eq!(pie.total + pie.excluded, analysis.rows.len());
    }
}

#[test]
fn test_scatter_and_bar_keep_real_values() {
    let table = sample_table();
    let cfg = Config::default();
    let analysis = analyze(&table, &default_selection(), &cfg, &default_bucketizer()).unwrap();

    let names: Vec<&str> = analysis.scatter.points.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C", "E"]);
    assert_eq!(analysis.scatter.excluded, 1);

    // C keeps its negative value, B its value beyond the axis
    assert_eq!(analysis.bar.points[2].plusone_time, Some(-9));
    assert_eq!(analysis.bar.points[1].gustave_time, Some(60));
    assert_eq!(analysis.bar.axis, AxisHint::from(&BarAxis::default()));
    assert_eq!(analysis.bar.axis.clamp(60), 50);
}

#[test]
fn test_missing_name_column_uses_row_numbers() {
    let table = sample_table();
    let cfg = Config {
        name_column: "case_id".into(),
        ..Config::default()
    };
    let analysis = analyze(&table, &default_selection(), &cfg, &default_bucketizer()).unwrap();

    assert_eq!(analysis.rows[0].name, "#1");
    assert_eq!(analysis.rows[4].name, "#5");
}

#[test]
fn test_json_contract() {
    let table = sample_table();
    let cfg = Config::default();
    let analysis = analyze(&table, &default_selection(), &cfg, &default_bucketizer()).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&caseboard::report::render_json(&analysis).unwrap()).unwrap();

    assert_eq!(json["rows"][0]["plusone_time"], 5);
    assert_eq!(json["rows"][0]["plusone_bucket"], "5-9 days");
    assert!(json["rows"][3]["plusone_time"].is_null());
    assert!(json["rows"][3]["plusone_bucket"].is_null());
    assert_eq!(json["rows"][2]["plusone_bucket"], "<0 days");
    assert_eq!(json["selection"]["plusone"]["start"], "submit_history_date");
    assert_eq!(json["negative_policy"], "bucket");
    assert_eq!(json["pies"][0]["metric"], "plusone");
}
