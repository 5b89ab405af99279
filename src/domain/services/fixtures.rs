use crate::domain::model::{Branch, CompanyRecord, PlacementRecord, RecordSet};

/// 2024: A(45 offers, 12 LPA), B(38, 9), C(32, 15); 2023: two companies.
/// Placements: 2024 class 500 / selected 400, 2023 class 400 / selected 300.
pub(crate) fn sample_records() -> RecordSet {
    let placements = vec![
        PlacementRecord::new(2024, Branch::Cse, 300, 250),
        PlacementRecord::new(2024, Branch::Ece, 200, 150),
        PlacementRecord::new(2023, Branch::Cse, 250, 200),
        PlacementRecord::new(2023, Branch::Ece, 150, 100),
    ];

    let companies = vec![
        CompanyRecord::new(2024, "A", 45)
            .with_salary(12.0)
            .with_branch(Branch::Cse, 30)
            .with_branch(Branch::Ece, 15),
        CompanyRecord::new(2024, "B", 38)
            .with_salary(9.0)
            .with_branch(Branch::Cse, 20)
            .with_branch(Branch::It, 18),
        CompanyRecord::new(2024, "C", 32)
            .with_salary(15.0)
            .with_branch(Branch::Ece, 32),
        CompanyRecord::new(2023, "A", 40)
            .with_salary(10.0)
            .with_branch(Branch::Cse, 40),
        CompanyRecord::new(2023, "D", 20).with_branch(Branch::Mech, 15),
    ];

    RecordSet::new(placements, companies)
}
