// crates/geotz-core/src/validate.rs

//! # Cross-Reference Validator
//!
//! Checks referential integrity between the source tables and reports every
//! violation it finds. No check short-circuits another: a row that fails one
//! rule is still run through all the others so a single run surfaces every
//! defect of the hand-maintained tables.
//!
//! Rows with at least one error are left out of [`Validated::accepted`];
//! warnings never reject a row.

use crate::diagnostics::Report;
use crate::iso;
use crate::raw::{FormalNames, RawCapital, RawLocation, Sources, StateAnsi};
use crate::text::{describe_chars, equals_ci, fold_key, is_upper_code, non_ascii_chars};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Outcome of looking up a capitals-table entry among the location rows.
#[derive(Debug, Clone, PartialEq)]
pub enum CapitalMatch<'a> {
    /// The capitals table lists no capital for this country.
    NoCapital,
    NotFound,
    Unique(&'a RawLocation),
    Ambiguous(Vec<&'a RawLocation>),
}

impl<'a> CapitalMatch<'a> {
    pub fn location(&self) -> Option<&'a RawLocation> {
        match self {
            CapitalMatch::Unique(row) => Some(*row),
            _ => None,
        }
    }
}

/// Rows that passed validation, plus the capital resolution per country.
#[derive(Debug, Clone, Default)]
pub struct Validated<'a> {
    /// Accepted location rows, in source order.
    pub accepted: Vec<&'a RawLocation>,
    /// Keyed by country short name.
    pub capitals: BTreeMap<&'a str, CapitalMatch<'a>>,
}

impl<'a> Validated<'a> {
    /// The uniquely resolved capital row of `country`, if any.
    pub fn capital_of(&self, country: &str) -> Option<&'a RawLocation> {
        self.capitals.get(country).and_then(CapitalMatch::location)
    }
}

/// Finds the location rows a capitals-table entry refers to.
///
/// The country name must match exactly; the capital name is compared
/// case-insensitively against both the city name and its ASCII spelling.
pub fn resolve_capital<'a>(capital: &RawCapital, rows: &[&'a RawLocation]) -> CapitalMatch<'a> {
    let name = capital.capital_name();
    if name.is_empty() {
        return CapitalMatch::NoCapital;
    }

    let mut found: Vec<&'a RawLocation> = rows
        .iter()
        .copied()
        .filter(|row| {
            row.country == capital.country
                && (equals_ci(&row.city, name) || equals_ci(&row.city_ascii, name))
        })
        .collect();

    match found.len() {
        0 => CapitalMatch::NotFound,
        1 => CapitalMatch::Unique(found.remove(0)),
        _ => CapitalMatch::Ambiguous(found),
    }
}

/// Runs every check and returns what can safely be assembled.
pub fn validate<'a>(sources: &'a Sources, report: &mut Report) -> Validated<'a> {
    let ctx = Lookups::new(sources);

    check_code_coverage(sources, report);
    check_capital_countries(sources, report);
    let accepted = check_locations(sources, &ctx, report);
    let capitals = resolve_capitals(sources, &accepted, report);
    check_cardinality(&accepted, &capitals, report);

    Validated { accepted, capitals }
}

/// Borrowed lookup sets built once per run.
struct Lookups<'a> {
    official: &'a FormalNames,
    capital_countries: HashSet<&'a str>,
    iso2: HashSet<&'a str>,
    iso3: HashSet<&'a str>,
    states: HashMap<&'a str, &'a StateAnsi>,
    timezones: HashSet<&'a str>,
}

impl<'a> Lookups<'a> {
    fn new(sources: &'a Sources) -> Self {
        Self {
            official: &sources.formal_names,
            capital_countries: sources.capitals.iter().map(|c| c.country.as_str()).collect(),
            iso2: sources.iso2_codes.iter().map(String::as_str).collect(),
            iso3: sources.iso3_codes.iter().map(String::as_str).collect(),
            states: sources
                .states_ansi
                .iter()
                .map(|s| (s.usps_code.as_str(), s))
                .collect(),
            timezones: sources.timezones.iter().map(String::as_str).collect(),
        }
    }
}

/// Every listed code must be used by at least one location.
fn check_code_coverage(sources: &Sources, report: &mut Report) {
    let seen_iso2: HashSet<&str> = sources.locations.iter().map(|l| l.country_iso2.as_str()).collect();
    for code in &sources.iso2_codes {
        if !seen_iso2.contains(code.as_str()) {
            report.referential(code.as_str(), "ISO 3166-1 alpha-2 code is missing from the locations table");
        }
    }

    let seen_iso3: HashSet<&str> = sources.locations.iter().map(|l| l.country_iso3.as_str()).collect();
    for code in &sources.iso3_codes {
        if !seen_iso3.contains(code.as_str()) {
            report.referential(code.as_str(), "ISO 3166-1 alpha-3 code is missing from the locations table");
        }
    }

    let seen_states: HashSet<&str> = sources.locations.iter().map(RawLocation::state_ansi).collect();
    for state in &sources.states_ansi {
        if !seen_states.contains(state.usps_code.as_str()) {
            report.referential(
                state.usps_code.as_str(),
                format!("state ANSI code ({}) is missing from the locations table", state.name),
            );
        }
    }
}

/// Capitals table and official list must name the same countries.
fn check_capital_countries(sources: &Sources, report: &mut Report) {
    let mut listed: HashSet<&str> = HashSet::new();

    for capital in &sources.capitals {
        if !listed.insert(capital.country.as_str()) {
            report.referential(capital.country.as_str(), "country is listed more than once in the capitals table");
        }
        if !sources.formal_names.contains_key(&capital.country) {
            report.referential(
                capital.country.as_str(),
                "country is in the capitals table but not in the official list",
            );
        }
    }

    for name in sources.formal_names.keys() {
        if !listed.contains(name.as_str()) {
            report.referential(
                name.as_str(),
                "country is in the official list but not in the capitals table",
            );
        }
    }
}

/// Collects the findings for one row and remembers whether it stays clean.
struct RowCheck<'r> {
    report: &'r mut Report,
    context: String,
    clean: bool,
}

impl<'r> RowCheck<'r> {
    fn new(report: &'r mut Report, context: String) -> Self {
        Self {
            report,
            context,
            clean: true,
        }
    }

    fn structural(&mut self, message: impl Into<String>) {
        self.report.structural(self.context.clone(), message);
        self.clean = false;
    }

    fn referential(&mut self, message: impl Into<String>) {
        self.report.referential(self.context.clone(), message);
        self.clean = false;
    }

    fn advisory(&mut self, message: impl Into<String>) {
        self.report.advisory(self.context.clone(), message);
    }
}

fn check_locations<'a>(sources: &'a Sources, ctx: &Lookups<'_>, report: &mut Report) -> Vec<&'a RawLocation> {
    let mut accepted = Vec::with_capacity(sources.locations.len());
    let mut keys: HashSet<(&str, &str)> = HashSet::new();
    let mut codes: HashMap<&str, (&str, &str)> = HashMap::new();

    for row in &sources.locations {
        let mut check = RowCheck::new(report, row.context());
        check_location(row, ctx, &mut check);

        let key = (row.country.trim(), row.city.trim());
        if keys.contains(&key) {
            check.referential("duplicate location: this country and city are already defined");
        }
        if let Some((iso2, iso3)) = codes.get(row.country.as_str()) {
            if (*iso2, *iso3) != (row.country_iso2.as_str(), row.country_iso3.as_str()) {
                check.referential(format!(
                    "countryIso2/countryIso3 {}/{} differ from {iso2}/{iso3} used by other rows of this country",
                    row.country_iso2, row.country_iso3
                ));
            }
        }

        if check.clean {
            keys.insert(key);
            codes
                .entry(row.country.as_str())
                .or_insert((row.country_iso2.as_str(), row.country_iso3.as_str()));
            accepted.push(row);
        }
    }

    accepted
}

fn check_location(row: &RawLocation, ctx: &Lookups<'_>, check: &mut RowCheck<'_>) {
    // names
    if row.city.trim().is_empty() {
        check.structural("city must be a non-empty string");
    }
    if row.city_ascii.trim().is_empty() {
        check.structural("cityAscii must be a non-empty string");
    } else {
        let bad = non_ascii_chars(&row.city_ascii);
        if !bad.is_empty() {
            check.structural(format!(
                "cityAscii must only contain ASCII characters, got {:?} with {} (transliteration would be {:?})",
                row.city_ascii,
                describe_chars(&bad),
                deunicode::deunicode(&row.city_ascii)
            ));
        }
    }

    // coordinates
    if !row.latitude.is_finite() {
        check.structural(format!("latitude must be a number, got {}", row.latitude));
    }
    if !row.longitude.is_finite() {
        check.structural(format!("longitude must be a number, got {}", row.longitude));
    }

    // country
    if row.country.trim().is_empty() {
        check.structural("country must be a non-empty string");
    } else {
        if !row.country.is_ascii() {
            check.advisory(format!(
                "country name has non-ASCII characters (folded form {:?})",
                fold_key(&row.country)
            ));
        }
        if !ctx.official.contains_key(&row.country) {
            check.referential("country is not referenced in the official list");
        }
        if !ctx.capital_countries.contains(row.country.as_str()) {
            check.referential("country does not have an entry in the capitals table");
        }
    }

    // ISO codes
    if !is_upper_code(&row.country_iso2, 2) {
        check.structural(format!(
            "countryIso2 must be two uppercase letters, got {:?}",
            row.country_iso2
        ));
    } else if !ctx.iso2.contains(row.country_iso2.as_str()) {
        check.referential(format!(
            "countryIso2 must be a valid ISO 3166-1 alpha-2 code, got {}",
            row.country_iso2
        ));
    }
    if !is_upper_code(&row.country_iso3, 3) {
        check.structural(format!(
            "countryIso3 must be three uppercase letters, got {:?}",
            row.country_iso3
        ));
    } else if !ctx.iso3.contains(row.country_iso3.as_str()) {
        check.referential(format!(
            "countryIso3 must be a valid ISO 3166-1 alpha-3 code, got {}",
            row.country_iso3
        ));
    }
    if !iso::is_consistent_pair(&row.country_iso2, &row.country_iso3) {
        check.referential(format!(
            "countryIso2/countryIso3 pair is not valid, got {}/{}",
            row.country_iso2, row.country_iso3
        ));
    }

    // US states
    if row.country_iso3 == "USA" {
        match ctx.states.get(row.state_ansi()) {
            None => check.referential(format!("invalid state ANSI code, got {:?}", row.state_ansi())),
            Some(state) if state.name != row.province => check.referential(format!(
                "province {:?} does not match state ANSI {} ({})",
                row.province, state.usps_code, state.name
            )),
            Some(_) => {}
        }
    }

    // timezone
    if row.timezone.trim().is_empty() {
        check.structural("timezone must be a non-empty string");
    } else if !ctx.timezones.contains(row.timezone.as_str()) {
        check.referential(format!("timezone is not a supported timezone, got {}", row.timezone));
    }
}

fn resolve_capitals<'a>(
    sources: &'a Sources,
    accepted: &[&'a RawLocation],
    report: &mut Report,
) -> BTreeMap<&'a str, CapitalMatch<'a>> {
    let mut by_country: HashMap<&str, Vec<&'a RawLocation>> = HashMap::new();
    for row in accepted {
        by_country.entry(row.country.as_str()).or_default().push(*row);
    }

    let mut resolved = BTreeMap::new();
    for capital in &sources.capitals {
        // duplicates were reported by check_capital_countries; the first entry wins
        if resolved.contains_key(capital.country.as_str()) {
            continue;
        }

        let rows = by_country
            .get(capital.country.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let found = resolve_capital(capital, rows);
        let context = format!("{} / {}", capital.country, capital.capital_name());

        match &found {
            CapitalMatch::NoCapital => report.advisory(capital.country.as_str(), "no capital listed for this country"),
            CapitalMatch::NotFound => report.referential(context, "capital not found among the valid locations"),
            CapitalMatch::Ambiguous(rows) => report.referential(
                context,
                format!(
                    "capital is ambiguous, {} locations match: {}",
                    rows.len(),
                    rows.iter().map(|r| r.city.as_str()).collect::<Vec<_>>().join(", ")
                ),
            ),
            CapitalMatch::Unique(_) => {}
        }

        resolved.insert(capital.country.as_str(), found);
    }

    resolved
}

fn check_cardinality(accepted: &[&RawLocation], capitals: &BTreeMap<&str, CapitalMatch<'_>>, report: &mut Report) {
    let countries: BTreeSet<&str> = accepted.iter().map(|row| row.country.as_str()).collect();
    let with_capital = capitals
        .values()
        .filter(|m| matches!(m, CapitalMatch::Unique(_)))
        .count();

    if countries.len() != with_capital {
        report.referential(
            "dataset",
            format!(
                "found {} countries but {} countries are referenced with their capital",
                countries.len(),
                with_capital
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;
    use crate::raw::fixtures::{self, loc};

    fn messages(report: &Report) -> Vec<String> {
        report.diagnostics().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn clean_sources_produce_no_diagnostics() {
        let sources = fixtures::sources();
        let mut report = Report::new();
        let validated = validate(&sources, &mut report);

        assert!(report.is_empty(), "{:#?}", messages(&report));
        assert_eq!(validated.accepted.len(), sources.locations.len());
        assert_eq!(validated.capital_of("Japan").map(|r| r.city.as_str()), Some("Tokyo"));
    }

    #[test]
    fn usa_province_must_match_state_name() {
        let mut sources = fixtures::sources();
        let mut report = Report::new();
        validate(&sources, &mut report);
        assert!(!report.has_errors());

        let little_rock = sources
            .locations
            .iter_mut()
            .find(|l| l.city == "Little Rock")
            .expect("fixture row");
        little_rock.province = "Alabama".into();

        let mut report = Report::new();
        let validated = validate(&sources, &mut report);
        let errors: Vec<_> = report.errors().collect();
        assert!(errors.iter().any(|d| d.kind == DiagnosticKind::Referential
            && d.context == "United States of America / Little Rock"
            && d.message.contains("Alabama")));
        assert!(validated.accepted.iter().all(|l| l.city != "Little Rock"));
    }

    #[test]
    fn every_check_runs_on_a_bad_row() {
        let mut sources = fixtures::sources();
        sources.locations.push(loc("", "Kyōto", "Japan", "jp", "FRA", "Kyōto", None, "Mars/Olympus", f64::NAN, 135.7));

        let mut report = Report::new();
        let validated = validate(&sources, &mut report);
        let all = messages(&report).join("\n");

        assert!(all.contains("city must be a non-empty string"));
        assert!(all.contains("'ō' (U+014D)"));
        assert!(all.contains("\"Kyoto\""));
        assert!(all.contains("latitude must be a number"));
        assert!(all.contains("countryIso2 must be two uppercase letters"));
        assert!(all.contains("pair is not valid, got jp/FRA"));
        assert!(all.contains("timezone is not a supported timezone"));
        assert_eq!(validated.accepted.len(), sources.locations.len() - 1);
    }

    #[test]
    fn iso_pair_mismatch_is_flagged_outside_allow_list() {
        let mut sources = fixtures::sources();
        sources.locations[0].country_iso3 = "FRA".into();

        let mut report = Report::new();
        validate(&sources, &mut report);
        assert!(messages(&report).iter().any(|m| m.contains("pair is not valid, got JP/FRA")));
    }

    #[test]
    fn duplicate_country_city_pairs_keep_the_first_row() {
        let mut sources = fixtures::sources();
        let mut dup = sources.locations[0].clone();
        dup.latitude = 0.0;
        sources.locations.push(dup);

        let mut report = Report::new();
        let validated = validate(&sources, &mut report);
        assert_eq!(report.error_count(), 1);
        let tokyo: Vec<_> = validated.accepted.iter().filter(|l| l.city == "Tokyo").collect();
        assert_eq!(tokyo.len(), 1);
        assert!((tokyo[0].latitude - 35.6897).abs() < f64::EPSILON);
    }

    #[test]
    fn rows_of_one_country_must_share_iso_codes() {
        let mut sources = fixtures::sources();
        sources
            .locations
            .push(loc("Lyon", "Lyon", "France", "JP", "JPN", "Auvergne-Rhône-Alpes", None, "Europe/Paris", 45.76, 4.84));

        let mut report = Report::new();
        let validated = validate(&sources, &mut report);
        let all = messages(&report);
        assert!(all
            .iter()
            .any(|m| m.contains("[France / Lyon]") && m.contains("JP/JPN differ from FR/FRA used by other rows")));
        assert_eq!(report.error_count(), 1);
        assert!(validated.accepted.iter().all(|l| l.city != "Lyon"));
    }

    #[test]
    fn repeated_capitals_entry_is_an_error_and_the_first_wins() {
        let mut sources = fixtures::sources();
        sources.capitals.push(fixtures::capital("France", "Saint-Denis"));

        let mut report = Report::new();
        let validated = validate(&sources, &mut report);
        assert!(messages(&report)
            .iter()
            .any(|m| m == "referential error [France]: country is listed more than once in the capitals table"));
        assert_eq!(report.error_count(), 1);
        assert_eq!(validated.capital_of("France").map(|l| l.city.as_str()), Some("Paris"));
    }

    #[test]
    fn capital_resolution_distinguishes_outcomes() {
        let sources = fixtures::sources();
        let rows: Vec<&RawLocation> = sources.locations.iter().collect();

        let by_ascii = fixtures::capital("Japan", "osaka");
        assert_eq!(resolve_capital(&by_ascii, &rows).location().map(|l| l.city.as_str()), Some("Ōsaka"));

        let missing = fixtures::capital("Japan", "Kyoto");
        assert_eq!(resolve_capital(&missing, &rows), CapitalMatch::NotFound);

        let none = RawCapital {
            country: "Japan".into(),
            capital: Some("  ".into()),
        };
        assert_eq!(resolve_capital(&none, &rows), CapitalMatch::NoCapital);

        let mut twice = sources.clone();
        let mut shouting = twice.locations[0].clone();
        shouting.city = "TOKYO".into();
        twice.locations.push(shouting);
        let rows: Vec<&RawLocation> = twice.locations.iter().collect();
        let tokyo = fixtures::capital("Japan", "Tokyo");
        assert!(matches!(resolve_capital(&tokyo, &rows), CapitalMatch::Ambiguous(ref m) if m.len() == 2));
    }

    #[test]
    fn unresolved_capital_reports_cardinality() {
        let mut sources = fixtures::sources();
        sources.capitals[0].capital = Some("Kyoto".into());

        let mut report = Report::new();
        let validated = validate(&sources, &mut report);
        let all = messages(&report);
        assert!(all.iter().any(|m| m.contains("[Japan / Kyoto]: capital not found")));
        assert!(all.iter().any(|m| m.contains("found 4 countries but 3 countries")));
        assert!(validated.capital_of("Japan").is_none());
    }

    #[test]
    fn capitals_and_official_list_are_compared_both_ways() {
        let mut sources = fixtures::sources();
        sources.capitals.retain(|c| c.country != "Kosovo");
        sources.capitals.push(fixtures::capital("Atlantis", "Poseidonia"));

        let mut report = Report::new();
        validate(&sources, &mut report);
        let all = messages(&report);
        assert!(all.iter().any(|m| m.contains("[Atlantis]: country is in the capitals table but not in the official list")));
        assert!(all.iter().any(|m| m.contains("[Kosovo]: country is in the official list but not in the capitals table")));
        assert!(all.iter().any(|m| m.contains("[Kosovo / Pristina]: country does not have an entry in the capitals table")));
    }

    #[test]
    fn unused_codes_and_states_are_reported() {
        let mut sources = fixtures::sources();
        sources.iso2_codes.push("DE".into());
        sources.iso3_codes.push("DEU".into());
        sources.states_ansi.push(fixtures::state("01", "AL", "Alabama", "01779775"));

        let mut report = Report::new();
        validate(&sources, &mut report);
        let all = messages(&report);
        assert!(all.iter().any(|m| m.starts_with("referential error [DE]")));
        assert!(all.iter().any(|m| m.starts_with("referential error [DEU]")));
        assert!(all.iter().any(|m| m.contains("[AL]: state ANSI code (Alabama)")));
    }

    #[test]
    fn non_ascii_country_name_is_only_advisory() {
        let mut sources = fixtures::sources();
        sources
            .formal_names
            .insert("Curaçao".into(), "The Country of Curaçao".into());
        sources.capitals.push(fixtures::capital("Curaçao", "Willemstad"));
        sources.iso2_codes.push("CW".into());
        sources.iso3_codes.push("CUW".into());
        sources.timezones.push("America/Curacao".into());
        sources.locations.push(loc("Willemstad", "Willemstad", "Curaçao", "CW", "CUW", "", None, "America/Curacao", 12.108, -68.935));

        let mut report = Report::new();
        let validated = validate(&sources, &mut report);
        assert!(!report.has_errors(), "{:#?}", messages(&report));
        assert_eq!(report.warning_count(), 1);
        assert!(validated.capital_of("Curaçao").is_some());
    }
}
