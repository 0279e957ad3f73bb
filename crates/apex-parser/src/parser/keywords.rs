//! Case-insensitive keyword table.
//!
//! Apex and SOQL keywords match regardless of letter case (`class`, `CLASS`, `Class`).
//! The table is built once per process and never mutated, so concurrent parses share it.

use std::sync::LazyLock;

use indexmap::IndexMap;

use super::cst::SyntaxKind::{self, *};

const KEYWORDS: &[(&str, SyntaxKind)] = &[
    // reserved
    ("abstract", KwAbstract),
    ("break", KwBreak),
    ("catch", KwCatch),
    ("class", KwClass),
    ("continue", KwContinue),
    ("delete", KwDelete),
    ("do", KwDo),
    ("else", KwElse),
    ("enum", KwEnum),
    ("extends", KwExtends),
    ("final", KwFinal),
    ("finally", KwFinally),
    ("for", KwFor),
    ("global", KwGlobal),
    ("if", KwIf),
    ("implements", KwImplements),
    ("insert", KwInsert),
    ("interface", KwInterface),
    ("merge", KwMerge),
    ("new", KwNew),
    ("null", KwNull),
    ("override", KwOverride),
    ("private", KwPrivate),
    ("protected", KwProtected),
    ("public", KwPublic),
    ("return", KwReturn),
    ("static", KwStatic),
    ("super", KwSuper),
    ("testmethod", KwTestMethod),
    ("this", KwThis),
    ("throw", KwThrow),
    ("try", KwTry),
    ("undelete", KwUndelete),
    ("update", KwUpdate),
    ("upsert", KwUpsert),
    ("virtual", KwVirtual),
    ("void", KwVoid),
    ("webservice", KwWebService),
    ("while", KwWhile),
    ("true", BooleanLiteral),
    ("false", BooleanLiteral),
    // soft
    ("after", KwAfter),
    ("as", KwAs),
    ("before", KwBefore),
    ("get", KwGet),
    ("inherited", KwInherited),
    ("instanceof", KwInstanceOf),
    ("on", KwOn),
    ("set", KwSet),
    ("sharing", KwSharing),
    ("switch", KwSwitch),
    ("system", KwSystem),
    ("transient", KwTransient),
    ("trigger", KwTrigger),
    ("user", KwUser),
    ("when", KwWhen),
    ("with", KwWith),
    ("without", KwWithout),
    // query
    ("select", KwSelect),
    ("from", KwFrom),
    ("where", KwWhere),
    ("and", KwAnd),
    ("or", KwOr),
    ("not", KwNot),
    ("order", KwOrder),
    ("by", KwBy),
    ("group", KwGroup),
    ("having", KwHaving),
    ("limit", KwLimit),
    ("offset", KwOffset),
    ("asc", KwAsc),
    ("desc", KwDesc),
    ("nulls", KwNulls),
    ("first", KwFirst),
    ("last", KwLast),
    ("like", KwLike),
    ("in", KwIn),
    ("includes", KwIncludes),
    ("excludes", KwExcludes),
    ("using", KwUsing),
    ("scope", KwScope),
    ("all", KwAll),
    ("rows", KwRows),
    ("view", KwView),
    ("reference", KwReference),
    ("tracking", KwTracking),
    ("viewstat", KwViewstat),
    ("rollup", KwRollup),
    ("cube", KwCube),
    ("typeof", KwTypeOf),
    ("then", KwThen),
    ("end", KwEnd),
    ("security_enforced", KwSecurityEnforced),
    ("user_mode", KwUserMode),
    ("system_mode", KwSystemMode),
    ("data", KwData),
    ("category", KwCategory),
    ("at", KwAt),
    ("above", KwAbove),
    ("below", KwBelow),
    ("above_or_below", KwAboveOrBelow),
    ("find", KwFind),
    ("returning", KwReturning),
    ("fields", KwFields),
];

static KEYWORD_TABLE: LazyLock<IndexMap<&'static str, SyntaxKind>> =
    LazyLock::new(|| KEYWORDS.iter().copied().collect());

/// Date literals usable as bare words in a query filter (`WHERE d = TODAY`).
const DATE_FORMULAS: &[&str] = &[
    "yesterday",
    "today",
    "tomorrow",
    "last_week",
    "this_week",
    "next_week",
    "last_month",
    "this_month",
    "next_month",
    "last_90_days",
    "next_90_days",
    "this_quarter",
    "last_quarter",
    "next_quarter",
    "this_year",
    "last_year",
    "next_year",
    "this_fiscal_quarter",
    "last_fiscal_quarter",
    "next_fiscal_quarter",
    "this_fiscal_year",
    "last_fiscal_year",
    "next_fiscal_year",
];

/// Date literals taking a count after a colon (`LAST_N_DAYS:30`).
const PARAMETERIZED_DATE_FORMULAS: &[&str] = &[
    "last_n_days",
    "next_n_days",
    "n_days_ago",
    "last_n_weeks",
    "next_n_weeks",
    "n_weeks_ago",
    "last_n_months",
    "next_n_months",
    "n_months_ago",
    "last_n_quarters",
    "next_n_quarters",
    "n_quarters_ago",
    "last_n_years",
    "next_n_years",
    "n_years_ago",
    "last_n_fiscal_quarters",
    "next_n_fiscal_quarters",
    "n_fiscal_quarters_ago",
    "last_n_fiscal_years",
    "next_n_fiscal_years",
    "n_fiscal_years_ago",
];

/// Looks up any keyword, ignoring case.
pub fn lookup(text: &str) -> Option<SyntaxKind> {
    if text.len() > longest_keyword() {
        return None;
    }
    KEYWORD_TABLE.get(text.to_ascii_lowercase().as_str()).copied()
}

/// Keyword kind the lexer assigns to an identifier, if any.
pub fn apex_keyword(text: &str) -> Option<SyntaxKind> {
    lookup(text).filter(|kind| kind.is_apex_keyword())
}

pub fn is_date_formula(text: &str) -> bool {
    DATE_FORMULAS.iter().any(|f| f.eq_ignore_ascii_case(text))
}

pub fn is_parameterized_date_formula(text: &str) -> bool {
    PARAMETERIZED_DATE_FORMULAS
        .iter()
        .any(|f| f.eq_ignore_ascii_case(text))
}

fn longest_keyword() -> usize {
    static LONGEST: LazyLock<usize> =
        LazyLock::new(|| KEYWORDS.iter().map(|(k, _)| k.len()).max().unwrap_or(0));
    *LONGEST
}
