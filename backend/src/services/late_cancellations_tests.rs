use super::*;

fn cancellation(member: &str, location: &str, class: &str, trainer: &str, penalty: Option<f64>) -> LateCancellation {
    let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
    LateCancellation {
        member_id: opt(member).map(MemberId::from),
        first_name: Some("Member".to_string()),
        last_name: opt(member),
        location: opt(location),
        cleaned_class: opt(class),
        teacher_name: opt(trainer),
        charged_penalty_amount: penalty,
        ..Default::default()
    }
}

fn sample() -> Vec<LateCancellation> {
    vec![
        cancellation("M1", "Kwality House", "Barre 57", "Anisha", Some(500.0)),
        cancellation("M2", "Supreme HQ", "PowerCycle", "Rohan", None),
        cancellation("M1", "Supreme HQ", "PowerCycle", "Rohan", Some(250.0)),
        cancellation("", "Kwality House", "Barre 57", "Anisha", Some(100.0)),
        cancellation("M3", "", "", "", None),
    ]
}

#[test]
fn test_summary_of_empty_collection() {
    let summary = summarize_cancellations(&[]);
    assert_eq!(summary, CancellationSummary::default());
    assert!(cancellation_cards(&summary).iter().all(|c| c.value == 0.0));
}

#[test]
fn test_summary_counts_distinct_non_empty_values() {
    let summary = summarize_cancellations(&sample());
    assert_eq!(summary.total_cancellations, 5);
    assert_eq!(summary.affected_members, 3);
    assert_eq!(summary.locations, 2);
    assert_eq!(summary.classes, 2);
    assert_eq!(summary.trainers, 2);
    assert_eq!(summary.total_penalty, 850.0);
}

#[test]
fn test_member_breakdown_orders_by_count() {
    let members = member_breakdown(&sample());
    assert_eq!(members.len(), 3);

    let first = &members[0];
    assert_eq!(first.member_id.as_str(), "M1");
    assert_eq!(first.count, 2);
    assert_eq!(first.locations, vec!["Kwality House", "Supreme HQ"]);
    assert_eq!(first.trainers, vec!["Anisha", "Rohan"]);
    assert_eq!(first.total_penalty, 750.0);
    assert_eq!(first.member_name.as_deref(), Some("Member M1"));

    // Ties fall back to member id order.
    assert_eq!(members[1].member_id.as_str(), "M2");
    assert_eq!(members[2].member_id.as_str(), "M3");
    assert!(members[2].locations.is_empty());
}

#[test]
fn test_rank_values() {
    let ranked = rank_values(&sample(), |r| r.class_name());
    assert_eq!(
        ranked,
        vec![
            ValueCount {
                value: "Barre 57".to_string(),
                count: 2
            },
            ValueCount {
                value: "PowerCycle".to_string(),
                count: 2
            },
        ]
    );

    let rankings = cancellation_rankings(&sample());
    assert_eq!(rankings.by_location.len(), 2);
    assert_eq!(rankings.by_trainer[0].count, 2);
}
