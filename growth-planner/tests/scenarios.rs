use growth_planner::tables::{LevelCost, RankCost};
use growth_planner::{
    CostTables, Denomination, EligmaInfo, GrowthPlan, ResourceKey, StudentData, StudentInfo,
    calculate_growth_needs,
};

const STUDENT: u32 = 10_000;
const CREDIT: ResourceKey = ResourceKey::currency(1);
const REPORT: ResourceKey = ResourceKey::item(10);
const ELIGMA: ResourceKey = ResourceKey::item(23);

fn students() -> StudentData {
    StudentData::from_students([StudentInfo {
        id: STUDENT,
        potential_material: 8_000,
        skill_ex_material: Vec::new(),
        skill_ex_material_amount: Vec::new(),
        skill_material: Vec::new(),
        skill_material_amount: Vec::new(),
        equipment: ["Hat".into(), "Gloves".into(), "Watch".into()],
    }])
}

fn synthetic_tables() -> CostTables {
    let mut tables = CostTables::default();
    tables.levels.insert(2, LevelCost { exp: 100, credit: 50 });
    tables.levels.insert(3, LevelCost { exp: 150, credit: 75 });
    tables.reports = vec![Denomination {
        key: REPORT,
        value: 100,
    }];
    tables.star_ranks.insert(
        2,
        RankCost {
            eleph: 20,
            credit: 10,
        },
    );
    tables
}

fn plan() -> GrowthPlan {
    GrowthPlan {
        student_id: Some(STUDENT),
        ..GrowthPlan::default()
    }
}

#[test]
fn level_only_plan_buys_credit_and_rounded_reports() {
    let mut plan = plan();
    plan.current.level = 1;
    plan.target.level = 3;

    let needs = calculate_growth_needs(&[plan], &students(), &synthetic_tables());

    assert_eq!(needs.len(), 2);
    assert_eq!(needs.get(CREDIT), 125);
    // floor(250 / 100) = 2, remainder 50 buys one more
    assert_eq!(needs.get(REPORT), 3);
}

#[test]
fn star_deficit_is_bought_with_eligma() {
    let mut plan = plan();
    plan.current.star = 1;
    plan.target.star = 2;
    plan.current.eleph = 5;
    plan.use_eligma_for_star = true;
    plan.eligma_info = EligmaInfo {
        price: 1,
        stock: None,
    };

    let needs = calculate_growth_needs(&[plan], &students(), &synthetic_tables());

    assert_eq!(needs.get(ELIGMA), 15);
    assert_eq!(needs.get(CREDIT), 10);
    assert_eq!(needs.get(ResourceKey::item(STUDENT)), 0);
}

#[test]
fn star_deficit_without_eligma_needs_student_eleph() {
    let mut plan = plan();
    plan.target.star = 2;
    plan.current.eleph = 5;

    let needs = calculate_growth_needs(&[plan], &students(), &synthetic_tables());

    assert_eq!(needs.get(ResourceKey::item(STUDENT)), 15);
    assert_eq!(needs.get(ELIGMA), 0);
}

#[test]
fn plan_without_student_contributes_nothing() {
    let mut plan = plan();
    plan.student_id = None;
    plan.current.level = 1;
    plan.target.level = 3;
    plan.target.star = 2;

    let needs = calculate_growth_needs(&[plan], &students(), &synthetic_tables());

    assert!(needs.is_empty());
}

#[test]
fn skipped_plans_do_not_disturb_neighbours() {
    let mut leveled = plan();
    leveled.target.level = 3;
    let mut orphan = leveled.clone();
    orphan.student_id = Some(99);

    let needs = calculate_growth_needs(
        &[orphan.clone(), leveled, orphan],
        &students(),
        &synthetic_tables(),
    );

    assert_eq!(needs.get(CREDIT), 125);
    assert_eq!(needs.get(REPORT), 3);
}

#[test]
fn output_keeps_category_id_serialization() {
    let mut plan = plan();
    plan.target.level = 3;
    let needs = calculate_growth_needs(&[plan], &students(), &synthetic_tables());
    let json = serde_json::to_value(&needs).unwrap();
    assert_eq!(json, serde_json::json!({"Currency_1": 125, "Item_10": 3}));
}
