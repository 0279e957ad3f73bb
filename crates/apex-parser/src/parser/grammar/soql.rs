//! SOQL queries, embedded in Apex or parsed standalone.
//!
//! Query keywords are never produced by the lexer. They are recognized here by
//! their text and recorded in the tree under their keyword kind.

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::token_sets::{NUMBERS, SIGNS, SOQL_COMPARISON_OPS};
use crate::parser::cst::{SyntaxKind, TokenSet};
use crate::parser::keywords;

/// Words that end a field list or filter; never taken as an alias.
const CLAUSE_KEYWORDS: TokenSet = TokenSet::new(&[
    SyntaxKind::KwFrom,
    SyntaxKind::KwWhere,
    SyntaxKind::KwWith,
    SyntaxKind::KwGroup,
    SyntaxKind::KwOrder,
    SyntaxKind::KwLimit,
    SyntaxKind::KwOffset,
    SyntaxKind::KwFor,
    SyntaxKind::KwUpdate,
    SyntaxKind::KwUsing,
    SyntaxKind::KwHaving,
    SyntaxKind::KwAnd,
    SyntaxKind::KwOr,
    SyntaxKind::KwNot,
    SyntaxKind::KwAsc,
    SyntaxKind::KwDesc,
    SyntaxKind::KwNulls,
    SyntaxKind::KwAll,
    SyntaxKind::KwLike,
    SyntaxKind::KwIn,
    SyntaxKind::KwIncludes,
    SyntaxKind::KwExcludes,
    SyntaxKind::KwWhen,
    SyntaxKind::KwThen,
    SyntaxKind::KwElse,
    SyntaxKind::KwEnd,
    SyntaxKind::KwReturning,
]);

/// Literal tokens accepted as query values.
const SOQL_LITERALS: TokenSet = TokenSet::new(&[
    SyntaxKind::IntegerLiteral,
    SyntaxKind::LongLiteral,
    SyntaxKind::NumberLiteral,
    SyntaxKind::StringLiteral,
    SyntaxKind::BooleanLiteral,
    SyntaxKind::KwNull,
    SyntaxKind::DateLiteral,
    SyntaxKind::DateTimeLiteral,
    SyntaxKind::IntegralCurrencyLiteral,
    SyntaxKind::DecimalCurrencyLiteral,
]);

const FOR_TARGETS: TokenSet = TokenSet::new(&[
    SyntaxKind::KwView,
    SyntaxKind::KwReference,
    SyntaxKind::KwUpdate,
]);

const UPDATE_TARGETS: TokenSet = TokenSet::new(&[SyntaxKind::KwTracking, SyntaxKind::KwViewstat]);

const DATA_CATEGORY_SELECTORS: TokenSet = TokenSet::new(&[
    SyntaxKind::KwAt,
    SyntaxKind::KwAbove,
    SyntaxKind::KwBelow,
    SyntaxKind::KwAboveOrBelow,
]);

impl Parser<'_, '_> {
    /// `SELECT ... FROM ... [clauses]`
    pub(crate) fn parse_query(&mut self) {
        if !self.enter_recursion() {
            return;
        }
        self.start_node(SyntaxKind::Query);

        self.expect_keyword(SyntaxKind::KwSelect, "`SELECT`");
        self.parse_select_list();
        self.parse_from_clause();

        if self.at_keyword(SyntaxKind::KwUsing) {
            self.parse_using_scope();
        }
        if self.at_keyword(SyntaxKind::KwWhere) {
            self.start_node(SyntaxKind::WhereClause);
            self.bump_remap(SyntaxKind::KwWhere);
            self.parse_logical_expr();
            self.finish_node();
        }
        while self.at_keyword(SyntaxKind::KwWith) {
            self.parse_with_clause();
        }
        if self.at_keyword(SyntaxKind::KwGroup) && self.nth_at_keyword(1, SyntaxKind::KwBy) {
            self.parse_group_by_clause();
        }
        if self.at_keyword(SyntaxKind::KwOrder) && self.nth_at_keyword(1, SyntaxKind::KwBy) {
            self.parse_order_by_clause();
        }
        if self.at_keyword(SyntaxKind::KwLimit) {
            self.parse_row_count_clause(SyntaxKind::LimitClause, SyntaxKind::KwLimit);
        }
        if self.at_keyword(SyntaxKind::KwOffset) {
            self.parse_row_count_clause(SyntaxKind::OffsetClause, SyntaxKind::KwOffset);
        }
        if self.at_keyword(SyntaxKind::KwAll) && self.nth_at_keyword(1, SyntaxKind::KwRows) {
            self.start_node(SyntaxKind::AllRowsClause);
            self.bump_remap(SyntaxKind::KwAll);
            self.bump_remap(SyntaxKind::KwRows);
            self.finish_node();
        }
        if self.at(SyntaxKind::KwFor) {
            self.parse_keyword_list_clause(
                SyntaxKind::ForClause,
                FOR_TARGETS,
                "`VIEW`, `REFERENCE` or `UPDATE`",
            );
        }
        if self.at(SyntaxKind::KwUpdate) {
            self.parse_keyword_list_clause(
                SyntaxKind::UpdateClause,
                UPDATE_TARGETS,
                "`TRACKING` or `VIEWSTAT`",
            );
        }

        self.finish_node();
        self.exit_recursion();
    }

    /// Whether the current word names a query keyword in `set`.
    fn at_keyword_in(&mut self, set: TokenSet) -> Option<SyntaxKind> {
        if !self.current().is_word() {
            return None;
        }
        keywords::lookup(self.current_text()).filter(|kind| set.contains(*kind))
    }

    /// A word usable as a field, object or alias name.
    fn at_soql_name(&mut self) -> bool {
        let kind = self.current();
        kind.is_word() || kind == SyntaxKind::IntegralCurrencyLiteral
    }

    fn at_alias(&mut self) -> bool {
        self.at_soql_name() && self.at_keyword_in(CLAUSE_KEYWORDS).is_none()
    }

    fn parse_select_list(&mut self) {
        self.start_node(SyntaxKind::SelectList);
        loop {
            self.parse_select_entry();
            if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.finish_node();
    }

    fn parse_select_entry(&mut self) {
        if self.at(SyntaxKind::ParenOpen) && self.nth_at_keyword(1, SyntaxKind::KwSelect) {
            self.parse_subquery();
            return;
        }
        if self.at_keyword(SyntaxKind::KwTypeOf) && self.nth(1).is_word() {
            self.parse_typeof();
            return;
        }
        if !self.at_soql_name() || self.at_keyword(SyntaxKind::KwFrom) {
            let found = self.describe_current();
            self.error_msg(DiagnosticKind::ExpectedQueryField, format!("found {found}"));
            return;
        }

        self.start_node(SyntaxKind::SelectField);
        self.parse_field_or_function();
        if self.at_alias() {
            self.start_node(SyntaxKind::SoqlAlias);
            self.bump_name();
            self.finish_node();
        }
        self.finish_node();
    }

    /// `Name`, `Account.Owner.Name` or `COUNT(Id)`
    fn parse_field_or_function(&mut self) {
        if self.at_soql_name() && self.next_is(SyntaxKind::ParenOpen) {
            self.parse_soql_function();
        } else {
            self.parse_field_name();
        }
    }

    pub(crate) fn parse_field_name(&mut self) {
        self.start_node(SyntaxKind::FieldName);
        if self.at_soql_name() {
            self.bump_name();
        } else {
            let found = self.describe_current();
            self.error_msg(DiagnosticKind::ExpectedQueryField, format!("found {found}"));
        }
        while self.at(SyntaxKind::Dot) && self.nth(1).is_word() {
            self.bump();
            self.bump_name();
        }
        self.finish_node();
    }

    /// `COUNT()`, `FIELDS(ALL)`, `toLabel(Status)`, `convertCurrency(Amount)`
    fn parse_soql_function(&mut self) {
        if !self.enter_recursion() {
            return;
        }
        self.start_node(SyntaxKind::SoqlFunction);
        self.bump_name();
        self.open_delimiter(SyntaxKind::ParenOpen);
        if !self.at(SyntaxKind::ParenClose) {
            loop {
                if self.at_soql_name() {
                    self.parse_field_or_function();
                } else {
                    self.parse_soql_value();
                }
                if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }
        self.close_delimiter(SyntaxKind::ParenClose, "function arguments");
        self.finish_node();
        self.exit_recursion();
    }

    /// `(SELECT ...)`
    fn parse_subquery(&mut self) {
        self.start_node(SyntaxKind::Subquery);
        self.open_delimiter(SyntaxKind::ParenOpen);
        self.parse_query();
        self.close_delimiter(SyntaxKind::ParenClose, "subquery");
        self.finish_node();
    }

    /// `TYPEOF What WHEN Account THEN Phone, Name ELSE Name END`
    fn parse_typeof(&mut self) {
        self.start_node(SyntaxKind::TypeOf);
        self.bump_remap(SyntaxKind::KwTypeOf);
        self.parse_field_name();

        while self.at_keyword(SyntaxKind::KwWhen) {
            self.start_node(SyntaxKind::TypeOfWhen);
            self.bump_remap(SyntaxKind::KwWhen);
            self.parse_field_name();
            self.expect_keyword(SyntaxKind::KwThen, "`THEN`");
            self.parse_field_name_list();
            self.finish_node();
        }
        if self.at_keyword(SyntaxKind::KwElse) {
            self.start_node(SyntaxKind::TypeOfElse);
            self.bump_remap(SyntaxKind::KwElse);
            self.parse_field_name_list();
            self.finish_node();
        }
        self.expect_keyword(SyntaxKind::KwEnd, "`END`");

        self.finish_node();
    }

    fn parse_field_name_list(&mut self) {
        loop {
            self.parse_field_name();
            if self.should_stop() || !self.at(SyntaxKind::Comma) {
                break;
            }
            self.bump();
        }
    }

    /// `FROM Account a, Contact`
    fn parse_from_clause(&mut self) {
        self.start_node(SyntaxKind::FromClause);
        if self.expect_keyword(SyntaxKind::KwFrom, "`FROM`") {
            loop {
                self.start_node(SyntaxKind::FromEntry);
                self.parse_field_name();
                if self.at_alias() {
                    self.start_node(SyntaxKind::SoqlAlias);
                    self.bump_name();
                    self.finish_node();
                }
                self.finish_node();
                if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }
        self.finish_node();
    }

    /// `USING SCOPE mine`
    fn parse_using_scope(&mut self) {
        self.start_node(SyntaxKind::UsingScope);
        self.bump_remap(SyntaxKind::KwUsing);
        self.expect_keyword(SyntaxKind::KwScope, "`SCOPE`");
        if self.at_soql_name() {
            self.bump_name();
        } else {
            let found = self.describe_current();
            self.error_msg(
                DiagnosticKind::ExpectedIdentifier,
                format!("scope name, found {found}"),
            );
        }
        self.finish_node();
    }

    /// Conditions joined by one kind of logical operator; mixing needs parentheses.
    pub(crate) fn parse_logical_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_condition();

        let mut operator = None;
        while let Some(next) = self.logical_operator() {
            match operator {
                None => operator = Some(next),
                Some(previous) if previous != next => {
                    self.error(DiagnosticKind::MixedLogicalOperators);
                }
                Some(_) => {}
            }
            self.bump_remap(next);
            self.parse_condition();
        }

        if operator.is_some() {
            self.start_node_at(checkpoint, SyntaxKind::LogicalCondition);
            self.finish_node();
        }
    }

    fn logical_operator(&mut self) -> Option<SyntaxKind> {
        if self.at_keyword(SyntaxKind::KwAnd) {
            Some(SyntaxKind::KwAnd)
        } else if self.at_keyword(SyntaxKind::KwOr) {
            Some(SyntaxKind::KwOr)
        } else {
            None
        }
    }

    /// `NOT cond`, `(conds)`, or a field comparison.
    fn parse_condition(&mut self) {
        if !self.enter_recursion() {
            return;
        }

        if self.at_keyword(SyntaxKind::KwNot) {
            self.start_node(SyntaxKind::NotCondition);
            self.bump_remap(SyntaxKind::KwNot);
            self.parse_condition();
            self.finish_node();
        } else if self.at(SyntaxKind::ParenOpen) {
            self.start_node(SyntaxKind::ParenCondition);
            self.open_delimiter(SyntaxKind::ParenOpen);
            self.parse_logical_expr();
            self.close_delimiter(SyntaxKind::ParenClose, "condition");
            self.finish_node();
        } else {
            self.parse_comparison();
        }

        self.exit_recursion();
    }

    /// `field op value`
    fn parse_comparison(&mut self) {
        self.start_node(SyntaxKind::Comparison);

        if self.at_soql_name() && self.at_keyword_in(CLAUSE_KEYWORDS).is_none() {
            self.parse_field_or_function();
        } else {
            let found = self.describe_current();
            let message = format!("found {found}");
            if self.should_stop()
                || self.at_keyword_in(CLAUSE_KEYWORDS).is_some()
                || matches!(
                    self.current(),
                    SyntaxKind::ParenClose | SyntaxKind::BracketClose
                )
            {
                self.error_msg(DiagnosticKind::ExpectedQueryField, message);
                self.finish_node();
                return;
            }
            self.error_and_bump_msg(DiagnosticKind::ExpectedQueryField, message);
        }

        if !self.parse_comparison_operator() {
            let message = self.expected_message("a comparison operator");
            self.error_msg(DiagnosticKind::UnexpectedToken, message);
            self.finish_node();
            return;
        }
        self.parse_soql_value();

        self.finish_node();
    }

    fn parse_comparison_operator(&mut self) -> bool {
        if self.at_set(SOQL_COMPARISON_OPS) {
            self.bump();
            return true;
        }
        if self.at_keyword(SyntaxKind::KwNot) && self.nth_at_keyword(1, SyntaxKind::KwIn) {
            self.bump_remap(SyntaxKind::KwNot);
            self.bump_remap(SyntaxKind::KwIn);
            return true;
        }
        for kw in [
            SyntaxKind::KwLike,
            SyntaxKind::KwIn,
            SyntaxKind::KwIncludes,
            SyntaxKind::KwExcludes,
        ] {
            if self.eat_keyword(kw) {
                return true;
            }
        }
        false
    }

    /// A value on the right of a comparison.
    pub(crate) fn parse_soql_value(&mut self) {
        match self.current() {
            SyntaxKind::Colon => self.parse_bound_expr(),
            SyntaxKind::ParenOpen if self.nth_at_keyword(1, SyntaxKind::KwSelect) => {
                self.parse_subquery();
            }
            SyntaxKind::ParenOpen => self.parse_value_list(),
            kind if SIGNS.contains(kind) => self.parse_signed_number(),
            kind if SOQL_LITERALS.contains(kind) => {
                self.start_node(SyntaxKind::SoqlLiteral);
                self.bump();
                self.finish_node();
            }
            kind if kind.is_word() && self.at_date_formula() => self.parse_date_formula(),
            _ => {
                let found = self.describe_current();
                let message = format!("found {found}");
                if self.should_stop()
                    || self.at_keyword_in(CLAUSE_KEYWORDS).is_some()
                    || matches!(
                        self.current(),
                        SyntaxKind::ParenClose | SyntaxKind::BracketClose | SyntaxKind::Comma
                    )
                {
                    self.error_msg(DiagnosticKind::ExpectedQueryValue, message);
                } else {
                    self.error_and_bump_msg(DiagnosticKind::ExpectedQueryValue, message);
                }
            }
        }
    }

    fn at_date_formula(&mut self) -> bool {
        let text = self.current_text();
        keywords::is_date_formula(text)
            || (keywords::is_parameterized_date_formula(text) && self.next_is(SyntaxKind::Colon))
    }

    /// `TODAY` or `LAST_N_DAYS:30`
    fn parse_date_formula(&mut self) {
        self.start_node(SyntaxKind::DateFormula);
        let parameterized = keywords::is_parameterized_date_formula(self.current_text());
        self.bump_name();
        if parameterized {
            self.bump();
            if self.at_set(SIGNS) {
                self.parse_signed_number();
            } else if self.at_set(NUMBERS) {
                self.bump();
            } else {
                let found = self.describe_current();
                self.error_msg(
                    DiagnosticKind::ExpectedLiteral,
                    format!("number of periods, found {found}"),
                );
            }
        }
        self.finish_node();
    }

    /// `:apexExpression`
    pub(crate) fn parse_bound_expr(&mut self) {
        self.start_node(SyntaxKind::BoundExpr);
        self.bump();
        self.parse_expr();
        self.finish_node();
    }

    /// `('a', 'b')`
    fn parse_value_list(&mut self) {
        self.start_node(SyntaxKind::ValueList);
        self.open_delimiter(SyntaxKind::ParenOpen);
        if !self.at(SyntaxKind::ParenClose) {
            loop {
                self.parse_soql_value();
                if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }
        self.close_delimiter(SyntaxKind::ParenClose, "value list");
        self.finish_node();
    }

    /// `WITH SECURITY_ENFORCED`, `WITH USER_MODE`, `WITH DATA CATEGORY ...`, `WITH filter`
    pub(crate) fn parse_with_clause(&mut self) {
        self.start_node(SyntaxKind::WithClause);
        self.bump_remap(SyntaxKind::KwWith);

        let access_mode = [
            SyntaxKind::KwSecurityEnforced,
            SyntaxKind::KwUserMode,
            SyntaxKind::KwSystemMode,
        ]
        .into_iter()
        .any(|kw| self.eat_keyword(kw));

        if !access_mode {
            if self.at_keyword(SyntaxKind::KwData) && self.nth_at_keyword(1, SyntaxKind::KwCategory)
            {
                self.parse_data_category();
            } else {
                self.parse_logical_expr();
            }
        }

        self.finish_node();
    }

    /// `DATA CATEGORY Geography__c AT usa__c AND Product__c BELOW (a__c, b__c)`
    pub(crate) fn parse_data_category(&mut self) {
        self.bump_remap(SyntaxKind::KwData);
        self.bump_remap(SyntaxKind::KwCategory);
        loop {
            self.start_node(SyntaxKind::DataCategoryFilter);
            self.parse_field_name();
            if let Some(selector) = self.at_keyword_in(DATA_CATEGORY_SELECTORS) {
                self.bump_remap(selector);
            } else {
                let message = self.expected_message("`AT`, `ABOVE`, `BELOW` or `ABOVE_OR_BELOW`");
                self.error_msg(DiagnosticKind::UnexpectedToken, message);
            }
            if self.at(SyntaxKind::ParenOpen) {
                self.open_delimiter(SyntaxKind::ParenOpen);
                loop {
                    self.parse_field_name();
                    if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                        break;
                    }
                }
                self.close_delimiter(SyntaxKind::ParenClose, "category list");
            } else {
                self.parse_field_name();
            }
            self.finish_node();
            if !self.eat_keyword(SyntaxKind::KwAnd) {
                break;
            }
        }
    }

    /// `GROUP BY a, b`, `GROUP BY ROLLUP(a, b)`, `GROUP BY CUBE(a)`, then `HAVING`.
    fn parse_group_by_clause(&mut self) {
        self.start_node(SyntaxKind::GroupByClause);
        self.bump_remap(SyntaxKind::KwGroup);
        self.bump_remap(SyntaxKind::KwBy);

        let grouping = [SyntaxKind::KwRollup, SyntaxKind::KwCube]
            .into_iter()
            .find(|kw| self.at_keyword(*kw) && self.next_is(SyntaxKind::ParenOpen));
        if let Some(kw) = grouping {
            self.bump_remap(kw);
            self.open_delimiter(SyntaxKind::ParenOpen);
            self.parse_field_name_list();
            self.close_delimiter(SyntaxKind::ParenClose, "grouping fields");
        } else {
            loop {
                self.parse_field_or_function();
                if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }

        if self.at_keyword(SyntaxKind::KwHaving) {
            self.start_node(SyntaxKind::HavingClause);
            self.bump_remap(SyntaxKind::KwHaving);
            self.parse_logical_expr();
            self.finish_node();
        }

        self.finish_node();
    }

    /// `ORDER BY Name DESC NULLS LAST, Id`
    pub(crate) fn parse_order_by_clause(&mut self) {
        self.start_node(SyntaxKind::OrderByClause);
        self.bump_remap(SyntaxKind::KwOrder);
        self.bump_remap(SyntaxKind::KwBy);
        loop {
            self.start_node(SyntaxKind::OrderItem);
            self.parse_field_or_function();
            if !self.eat_keyword(SyntaxKind::KwAsc) {
                self.eat_keyword(SyntaxKind::KwDesc);
            }
            if self.eat_keyword(SyntaxKind::KwNulls)
                && !self.eat_keyword(SyntaxKind::KwFirst)
                && !self.eat_keyword(SyntaxKind::KwLast)
            {
                let message = self.expected_message("`FIRST` or `LAST`");
                self.error_msg(DiagnosticKind::UnexpectedToken, message);
            }
            self.finish_node();
            if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.finish_node();
    }

    /// `LIMIT 10`, `OFFSET :skip`
    pub(crate) fn parse_row_count_clause(&mut self, kind: SyntaxKind, keyword: SyntaxKind) {
        self.start_node(kind);
        self.bump_remap(keyword);
        match self.current() {
            SyntaxKind::IntegerLiteral => {
                self.start_node(SyntaxKind::SoqlLiteral);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::Colon => self.parse_bound_expr(),
            _ => {
                let found = self.describe_current();
                self.error_msg(
                    DiagnosticKind::ExpectedQueryValue,
                    format!("row count, found {found}"),
                );
            }
        }
        self.finish_node();
    }

    /// `FOR VIEW, REFERENCE` or `UPDATE TRACKING`
    pub(crate) fn parse_keyword_list_clause(
        &mut self,
        kind: SyntaxKind,
        targets: TokenSet,
        what: &str,
    ) {
        self.start_node(kind);
        self.bump();
        loop {
            if let Some(target) = self.at_keyword_in(targets) {
                self.bump_remap(target);
            } else {
                let message = self.expected_message(what);
                self.error_msg(DiagnosticKind::UnexpectedToken, message);
                break;
            }
            if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
        self.finish_node();
    }
}
