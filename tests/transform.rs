use regatta_tools::ToolError;
use regatta_tools::model::{Cell, RawTable, Table};
use regatta_tools::schema::{COX_POSITION, Field, TEAM_FLAG_FIELDS};
use regatta_tools::transform::{
    assign_positions, normalize_flags, project_columns, resolve_coxes, unique_rowers,
    with_positions,
};

fn text(value: &str) -> Cell {
    Cell::text(value)
}

fn teams(rows: &[(&str, &str, bool, &str)]) -> Table {
    // crew id, club, cox flag, cox name
    let columns = vec![
        Field::CrewId,
        Field::BoatType,
        Field::Club,
        Field::CrewName,
        Field::CrewLetter,
        Field::Cox,
        Field::CoxName,
    ];
    let rows = rows
        .iter()
        .map(|(crew, club, cox, cox_name)| {
            vec![
                text(crew),
                text("8+"),
                text(club),
                text(&format!("{club} {crew}")),
                text("A"),
                Cell::Bool(*cox),
                if cox_name.is_empty() {
                    Cell::Missing
                } else {
                    text(cox_name)
                },
            ]
        })
        .collect();
    Table::from_rows(columns, rows).expect("teams table built")
}

fn rowers(rows: &[(&str, &str, &str)]) -> Table {
    // crew id, name, membership number
    let columns = vec![
        Field::CrewId,
        Field::Name,
        Field::MembershipNumber,
        Field::Gender,
    ];
    let rows = rows
        .iter()
        .map(|(crew, name, number)| {
            vec![
                text(crew),
                text(name),
                if number.is_empty() {
                    Cell::Missing
                } else {
                    text(number)
                },
                text("F"),
            ]
        })
        .collect();
    Table::from_rows(columns, rows).expect("rowers table built")
}

fn members(rows: &[(&str, &str, &str)]) -> Table {
    // name, membership number, gender
    let columns = vec![
        Field::MemberId,
        Field::Name,
        Field::MembershipNumber,
        Field::Gender,
        Field::Dob,
    ];
    let rows = rows
        .iter()
        .enumerate()
        .map(|(index, (name, number, gender))| {
            vec![
                text(&format!("m{index}")),
                text(name),
                text(number),
                text(gender),
                text("1990-01-01"),
            ]
        })
        .collect();
    Table::from_rows(columns, rows).expect("members table built")
}

fn cox_rows(table: &Table) -> Vec<&[Cell]> {
    let position = table.column_index(Field::Position).expect("position column");
    table
        .rows()
        .iter()
        .filter(|row| row[position] == text(COX_POSITION))
        .map(Vec::as_slice)
        .collect()
}

#[test]
fn projection_selects_and_renames_columns_in_order() {
    let raw = RawTable::new(
        vec!["Team".into(), "Club".into(), "Entrant".into()],
        vec![
            vec![text("T1"), text("Tyne"), text("Alice")],
            vec![text("T2"), text("Durham")],
        ],
    );

    let table = project_columns(&raw, &[2, 0], &[Field::Name, Field::CrewId])
        .expect("projection succeeds");

    assert_eq!(table.columns(), &[Field::Name, Field::CrewId]);
    assert_eq!(table.rows()[0], vec![text("Alice"), text("T1")]);
    assert_eq!(table.rows()[1], vec![Cell::Missing, text("T2")]);
}

#[test]
fn projection_rejects_mismatched_lists() {
    let raw = RawTable::new(vec!["a".into(), "b".into()], Vec::new());

    let error = project_columns(&raw, &[0, 1], &[Field::Name]).unwrap_err();

    assert!(matches!(
        error,
        ToolError::ColumnCountMismatch {
            indices: 2,
            fields: 1
        }
    ));
}

#[test]
fn projection_rejects_out_of_range_index() {
    let raw = RawTable::new(vec!["a".into(), "b".into()], vec![vec![text("x"), text("y")]]);

    let error = project_columns(&raw, &[0, 5], &[Field::Name, Field::Club]).unwrap_err();

    assert!(matches!(
        error,
        ToolError::ColumnOutOfRange { index: 5, width: 2 }
    ));
}

#[test]
fn projection_keeps_identifiers_as_text() {
    let raw = RawTable::new(
        vec!["SR".into(), "Points".into()],
        vec![
            vec![Cell::Number(123456.0), Cell::Number(4.0)],
            vec![text("  "), Cell::Number(0.0)],
            vec![text("SR0042"), Cell::Missing],
        ],
    );

    let table = project_columns(&raw, &[0, 1], &[Field::MembershipNumber, Field::RowingPoints])
        .expect("projection succeeds");

    let numbers = table.column(Field::MembershipNumber).expect("column present");
    assert_eq!(numbers, vec![&text("123456"), &Cell::Missing, &text("SR0042")]);
    assert_eq!(table.get(0, Field::RowingPoints), Some(&Cell::Number(4.0)));
}

#[test]
fn flags_map_markers_to_booleans() {
    let table = Table::from_rows(
        vec![Field::Club, Field::Verified, Field::Captain, Field::Cox],
        vec![
            vec![text("Tyne"), text("Y"), text("N"), Cell::Missing],
            vec![text("Y"), Cell::Missing, text("Y"), text("N")],
        ],
    )
    .expect("table built");

    let normalized = normalize_flags(&table, &TEAM_FLAG_FIELDS).expect("flags normalized");

    assert_eq!(
        normalized.rows()[0],
        vec![text("Tyne"), Cell::Bool(true), Cell::Bool(false), Cell::Bool(false)]
    );
    // columns outside the flag set are left alone
    assert_eq!(
        normalized.rows()[1],
        vec![text("Y"), Cell::Bool(false), Cell::Bool(true), Cell::Bool(false)]
    );
}

#[test]
fn flags_normalization_is_idempotent() {
    let table = Table::from_rows(
        vec![Field::Cox],
        vec![vec![text("Y")], vec![text("N")], vec![Cell::Missing]],
    )
    .expect("table built");

    let once = normalize_flags(&table, &[Field::Cox]).expect("first pass");
    let twice = normalize_flags(&once, &[Field::Cox]).expect("second pass");

    assert_eq!(once, twice);
}

#[test]
fn flags_require_named_columns() {
    let table = Table::new(vec![Field::Club]);

    let error = normalize_flags(&table, &[Field::Cox]).unwrap_err();

    assert!(matches!(error, ToolError::MissingColumn(Field::Cox)));
}

#[test]
fn positions_count_from_one_within_each_crew() {
    let table = rowers(&[
        ("A", "Ann", "1"),
        ("A", "Amy", "2"),
        ("A", "Ada", "3"),
        ("B", "Bea", "4"),
        ("B", "Bo", "5"),
    ]);

    let positions = assign_positions(&table).expect("positions assigned");

    assert_eq!(positions, vec!["1", "2", "3", "1", "2"]);
}

#[test]
fn positions_follow_row_order_when_crews_interleave() {
    let table = rowers(&[("A", "Ann", "1"), ("B", "Bea", "2"), ("A", "Amy", "3")]);

    let positioned = with_positions(&table).expect("positions assigned");

    let positions = positioned.column(Field::Position).expect("position column");
    assert_eq!(positions, vec![&text("1"), &text("1"), &text("2")]);
}

#[test]
fn unique_rowers_keeps_first_occurrence() {
    let table = rowers(&[
        ("A", "Alice", "100"),
        ("A", "Bob", "200"),
        ("B", "Alice", "100"),
    ]);

    let unique = unique_rowers(&table).expect("rowers deduplicated");

    assert_eq!(unique.rows(), &table.rows()[..2]);
}

#[test]
fn unique_rowers_merges_namesakes_without_numbers() {
    let table = rowers(&[("A", "Sam", ""), ("B", "Sam", "")]);

    let unique = unique_rowers(&table).expect("rowers deduplicated");

    assert_eq!(unique.len(), 1);
}

#[test]
fn matched_cox_gains_membership_details() {
    let crews = teams(&[("T1", "Tyne", true, "Jane Doe")]);
    let crew_members = with_positions(&rowers(&[("T1", "Ann", "SR1")])).expect("positions");
    let register = members(&[("Jane Doe", "SR123", "F")]);

    let resolved =
        resolve_coxes(&crews, crew_members, Some(&register)).expect("coxes resolved");

    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved.get(1, Field::Position), Some(&text("C")));
    assert_eq!(resolved.get(1, Field::Name), Some(&text("Jane Doe")));
    assert_eq!(resolved.get(1, Field::MembershipNumber), Some(&text("SR123")));
    assert_eq!(resolved.get(1, Field::Dob), Some(&text("1990-01-01")));
    assert_eq!(resolved.get(1, Field::Club), Some(&text("Tyne")));
    // rower rows keep their values and get blanks for cox-only columns
    assert_eq!(resolved.get(0, Field::Name), Some(&text("Ann")));
    assert_eq!(resolved.get(0, Field::Position), Some(&text("1")));
    assert_eq!(resolved.get(0, Field::Dob), Some(&Cell::Missing));
}

#[test]
fn unmatched_cox_is_appended_with_blank_details() {
    let crews = teams(&[("T1", "Tyne", true, "Nobody Known")]);
    let crew_members = with_positions(&rowers(&[("T1", "Ann", "SR1")])).expect("positions");
    let register = members(&[("Jane Doe", "SR123", "F")]);

    let resolved =
        resolve_coxes(&crews, crew_members, Some(&register)).expect("coxes resolved");

    let coxes = cox_rows(&resolved);
    assert_eq!(coxes.len(), 1);
    assert_eq!(resolved.get(1, Field::Name), Some(&text("Nobody Known")));
    assert_eq!(resolved.get(1, Field::MembershipNumber), Some(&Cell::Missing));
    assert_eq!(resolved.get(1, Field::Gender), Some(&Cell::Missing));
}

#[test]
fn crews_without_cox_add_no_rows() {
    let crews = teams(&[("T1", "Tyne", false, ""), ("T2", "Tyne", true, "Jo")]);
    let crew_members = with_positions(&rowers(&[("T1", "Ann", "SR1")])).expect("positions");

    let resolved = resolve_coxes(&crews, crew_members, None).expect("coxes resolved");

    let coxes = cox_rows(&resolved);
    assert_eq!(coxes.len(), 1);
    assert_eq!(resolved.get(1, Field::CrewId), Some(&text("T2")));
}

#[test]
fn cox_rowing_elsewhere_is_found_without_register() {
    let crews = teams(&[("T1", "Tyne", true, "Ann"), ("T2", "Tyne", false, "")]);
    let crew_members = with_positions(&rowers(&[
        ("T2", "Ann", "SR9"),
        ("T2", "Bea", "SR8"),
        ("T1", "Cat", "SR7"),
    ]))
    .expect("positions");

    let resolved = resolve_coxes(&crews, crew_members, None).expect("coxes resolved");

    assert_eq!(resolved.len(), 4);
    assert_eq!(resolved.get(3, Field::CrewId), Some(&text("T1")));
    assert_eq!(resolved.get(3, Field::Position), Some(&text("C")));
    assert_eq!(resolved.get(3, Field::MembershipNumber), Some(&text("SR9")));
    assert_eq!(resolved.get(3, Field::Gender), Some(&text("F")));
}

#[test]
fn cox_name_match_is_case_sensitive() {
    let crews = teams(&[("T1", "Tyne", true, "jane doe")]);
    let register = members(&[("Jane Doe", "SR123", "F")]);

    let resolved = resolve_coxes(&crews, rowers(&[]), Some(&register)).expect("coxes resolved");

    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved.get(0, Field::MembershipNumber), Some(&Cell::Missing));
}

#[test]
fn duplicate_member_names_fan_out() {
    let crews = teams(&[("T1", "Tyne", true, "Sam Smith")]);
    let register = members(&[("Sam Smith", "SR1", "M"), ("Sam Smith", "SR2", "F")]);

    let resolved = resolve_coxes(&crews, rowers(&[]), Some(&register)).expect("coxes resolved");

    let numbers = resolved.column(Field::MembershipNumber).expect("column present");
    assert_eq!(numbers, vec![&text("SR1"), &text("SR2")]);
}

#[test]
fn resolved_membership_numbers_are_text() {
    let crews = teams(&[("T1", "Tyne", true, "Jane")]);
    let crew_members = Table::from_rows(
        vec![Field::CrewId, Field::Name, Field::MembershipNumber],
        vec![
            vec![text("T2"), text("Jane"), Cell::Number(123.0)],
            vec![text("T2"), text("Kim"), Cell::Number(0.0)],
        ],
    )
    .expect("rowers table built");

    let resolved = resolve_coxes(&crews, crew_members, None).expect("coxes resolved");

    let numbers = resolved.column(Field::MembershipNumber).expect("column present");
    assert_eq!(numbers, vec![&text("123"), &Cell::Missing, &text("123")]);
}

#[test]
fn identifiers_beyond_integer_range_keep_their_digits() {
    let raw = RawTable::new(vec!["SR".into()], vec![vec![Cell::Number(1e20)]]);

    let table =
        project_columns(&raw, &[0], &[Field::MembershipNumber]).expect("projection succeeds");

    assert_eq!(
        table.get(0, Field::MembershipNumber),
        Some(&text("100000000000000000000"))
    );
}
