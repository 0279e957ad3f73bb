//! Syntax kinds for Apex, SOQL and SOSL.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds (from parser).
//! Logos derives recognition of punctuation, literals, identifiers and trivia.
//! Keyword kinds carry no logos attribute: the lexer classifies identifiers through
//! the keyword table, and query keywords are only assigned by the parser in query context.
//! `ApexLang` implements Rowan's `Language` trait for tree construction.

use logos::Logos;
use rowan::Language;
use serde::Serialize;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    /// Null-safe navigation `?.`
    #[token("?.")]
    QuestionDot,

    #[token("=")]
    Assign,

    /// `>` is never merged with a following `>`; shifts are combined by the parser
    /// so that nested generic arguments close correctly.
    #[token(">")]
    Gt,

    #[token("<")]
    Lt,

    #[token("!")]
    Bang,

    #[token("~")]
    Tilde,

    #[token("?")]
    Question,

    #[token("??")]
    QuestionQuestion,

    #[token(":")]
    Colon,

    #[token("==")]
    EqEq,

    #[token("===")]
    EqEqEq,

    #[token("<=")]
    Le,

    #[token(">=")]
    Ge,

    #[token("!=")]
    NotEq,

    #[token("<>")]
    LtGt,

    #[token("!==")]
    NotEqEq,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("&")]
    Amp,

    #[token("|")]
    Pipe,

    #[token("^")]
    Caret,

    /// Map initializer entry separator
    #[token("=>")]
    FatArrow,

    #[token("+=")]
    PlusEq,

    #[token("-=")]
    MinusEq,

    #[token("*=")]
    StarEq,

    #[token("/=")]
    SlashEq,

    #[token("&=")]
    AmpEq,

    #[token("|=")]
    PipeEq,

    #[token("^=")]
    CaretEq,

    #[token("<<=")]
    ShlEq,

    #[token(">>=")]
    ShrEq,

    #[token(">>>=")]
    UshrEq,

    #[token("@")]
    At,

    // --- Literals ---
    #[regex(r"[0-9]+")]
    IntegerLiteral,

    #[regex(r"[0-9]+[lL]")]
    LongLiteral,

    #[regex(r"[0-9]*\.[0-9]+[dD]?")]
    #[regex(r"[0-9]+[dD]")]
    NumberLiteral,

    #[regex(r"'(?:[^'\\\r\n]|\\.)*'")]
    StringLiteral,

    /// `2020-01-01`. Longest match keeps it from splitting into `2020 - 01 - 01`.
    #[regex(r"[0-9]{4}-[0-9]{2}-[0-9]{2}")]
    DateLiteral,

    #[regex(
        r"[0-9]{4}-[0-9]{2}-[0-9]{2}[tT][0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?([zZ]|[+-][0-9]{2}(:?[0-9]{2})?)"
    )]
    DateTimeLiteral,

    /// `USD100`. Also a valid identifier; the parser decides by position.
    #[regex(r"[a-zA-Z]{3}[0-9]+", priority = 5)]
    IntegralCurrencyLiteral,

    /// `USD100.01`
    #[regex(r"[a-zA-Z]{3}[0-9]+\.[0-9]+")]
    DecimalCurrencyLiteral,

    /// Identifier. Keywords are classified from this by the lexer's keyword pass.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    // --- Trivia ---
    #[regex(r"[ \t\x0C]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    #[token("\r")]
    Newline,

    #[regex(r"//[^\r\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    /// Coalesced unrecognized characters
    Garbage,
    Error,

    // --- Apex reserved keywords (never identifiers) ---
    KwAbstract,
    KwBreak,
    KwCatch,
    KwClass,
    KwContinue,
    KwDelete,
    KwDo,
    KwElse,
    KwEnum,
    KwExtends,
    KwFinal,
    KwFinally,
    KwFor,
    KwGlobal,
    KwIf,
    KwImplements,
    KwInsert,
    KwInterface,
    KwMerge,
    KwNew,
    KwNull,
    KwOverride,
    KwPrivate,
    KwProtected,
    KwPublic,
    KwReturn,
    KwStatic,
    KwSuper,
    KwTestMethod,
    KwThis,
    KwThrow,
    KwTry,
    KwUndelete,
    KwUpdate,
    KwUpsert,
    KwVirtual,
    KwVoid,
    KwWebService,
    KwWhile,
    /// `true` / `false` in any casing
    BooleanLiteral,

    // --- Apex soft keywords (valid identifiers outside their construct) ---
    KwAfter,
    KwAs,
    KwBefore,
    KwGet,
    KwInherited,
    KwInstanceOf,
    KwOn,
    KwSet,
    KwSharing,
    KwSwitch,
    KwSystem,
    KwTransient,
    KwTrigger,
    KwUser,
    KwWhen,
    KwWith,
    KwWithout,

    // --- Query keywords (assigned by the parser in query context only) ---
    KwSelect,
    KwFrom,
    KwWhere,
    KwAnd,
    KwOr,
    KwNot,
    KwOrder,
    KwBy,
    KwGroup,
    KwHaving,
    KwLimit,
    KwOffset,
    KwAsc,
    KwDesc,
    KwNulls,
    KwFirst,
    KwLast,
    KwLike,
    KwIn,
    KwIncludes,
    KwExcludes,
    KwUsing,
    KwScope,
    KwAll,
    KwRows,
    KwView,
    KwReference,
    KwTracking,
    KwViewstat,
    KwRollup,
    KwCube,
    KwTypeOf,
    KwThen,
    KwEnd,
    KwSecurityEnforced,
    KwUserMode,
    KwSystemMode,
    KwData,
    KwCategory,
    KwAt,
    KwAbove,
    KwBelow,
    KwAboveOrBelow,
    KwFind,
    KwReturning,
    KwFields,

    // --- Node kinds (non-terminals) ---
    CompilationUnit,
    TriggerUnit,
    AnonymousUnit,
    StatementUnit,
    ExpressionUnit,
    QueryUnit,
    LiteralUnit,

    // Declarations
    ModifierList,
    Annotation,
    AnnotationArgs,
    ElementValuePair,
    QualifiedName,
    ClassDecl,
    InterfaceDecl,
    EnumDecl,
    ExtendsClause,
    ImplementsClause,
    ClassBody,
    InterfaceBody,
    EnumBody,
    FieldDecl,
    VariableDeclarator,
    MethodDecl,
    ConstructorDecl,
    ParamList,
    Param,
    PropertyDecl,
    PropertyAccessor,
    InitializerBlock,
    TriggerCase,

    // Types
    TypeRef,
    TypeName,
    TypeArgs,
    ArraySubscript,

    // Statements
    Block,
    LocalVarDecl,
    IfStmt,
    ElseClause,
    SwitchStmt,
    WhenClause,
    WhenValue,
    WhenTypeBinding,
    ForStmt,
    ForControl,
    EnhancedForControl,
    ForInit,
    ForUpdate,
    WhileStmt,
    DoWhileStmt,
    TryStmt,
    CatchClause,
    FinallyClause,
    ReturnStmt,
    ThrowStmt,
    BreakStmt,
    ContinueStmt,
    DmlStmt,
    AccessLevel,
    RunAsStmt,
    ExprStmt,
    EmptyStmt,

    // Expressions
    Literal,
    SignedNumber,
    NameRef,
    ThisExpr,
    SuperExpr,
    ParenExpr,
    ClassRefExpr,
    FieldAccessExpr,
    MethodCallExpr,
    ArgList,
    IndexExpr,
    NewExpr,
    ArrayCreator,
    CollectionInit,
    MapInit,
    MapEntry,
    CastExpr,
    PostfixExpr,
    PrefixExpr,
    NegExpr,
    MultiplicativeExpr,
    AdditiveExpr,
    ShiftExpr,
    ComparisonExpr,
    InstanceOfExpr,
    EqualityExpr,
    BitAndExpr,
    BitXorExpr,
    BitOrExpr,
    LogicalAndExpr,
    LogicalOrExpr,
    CoalesceExpr,
    ConditionalExpr,
    AssignExpr,
    SoqlExpr,
    SoslExpr,

    // SOQL
    Query,
    SelectList,
    SelectField,
    FieldName,
    SoqlFunction,
    SoqlAlias,
    Subquery,
    TypeOf,
    TypeOfWhen,
    TypeOfElse,
    FromClause,
    FromEntry,
    UsingScope,
    WhereClause,
    LogicalCondition,
    NotCondition,
    ParenCondition,
    Comparison,
    SoqlLiteral,
    DateFormula,
    ValueList,
    BoundExpr,
    WithClause,
    DataCategoryFilter,
    GroupByClause,
    HavingClause,
    OrderByClause,
    OrderItem,
    LimitClause,
    OffsetClause,
    AllRowsClause,
    ForClause,
    UpdateClause,

    // SOSL
    SoslQuery,
    SearchGroup,
    ReturningClause,
    ReturningEntry,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline | LineComment | BlockComment)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage)
    }

    /// Token kinds sit below the first node kind.
    #[inline]
    pub fn is_token(self) -> bool {
        (self as u16) < (CompilationUnit as u16)
    }

    #[inline]
    pub fn is_node(self) -> bool {
        !self.is_token() && self != __LAST
    }

    /// Reserved Apex keywords: never accepted where an identifier is expected.
    #[inline]
    pub fn is_reserved_keyword(self) -> bool {
        (KwAbstract as u16..=BooleanLiteral as u16).contains(&(self as u16))
    }

    /// Keywords that double as identifiers (`trigger`, `set`, `system`, ...).
    #[inline]
    pub fn is_soft_keyword(self) -> bool {
        (KwAfter as u16..=KwWithout as u16).contains(&(self as u16))
    }

    /// Every keyword the lexer may produce.
    #[inline]
    pub fn is_apex_keyword(self) -> bool {
        self.is_reserved_keyword() || self.is_soft_keyword()
    }

    /// Query keywords; only produced by remapping in query context.
    #[inline]
    pub fn is_query_keyword(self) -> bool {
        (KwSelect as u16..=KwFields as u16).contains(&(self as u16))
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        self.is_apex_keyword() || self.is_query_keyword()
    }

    /// Word-shaped tokens: identifiers and keywords of either language.
    #[inline]
    pub fn is_word(self) -> bool {
        self == Ident || self.is_keyword()
    }

    /// Whether the parser may accept this token where an Apex identifier is expected.
    #[inline]
    pub fn is_name(self) -> bool {
        matches!(self, Ident | IntegralCurrencyLiteral)
            || self.is_soft_keyword()
            || self.is_query_keyword()
    }

    /// Converts a raw discriminant back to a kind, if in range.
    pub fn from_raw(raw: u16) -> Option<SyntaxKind> {
        if raw < __LAST as u16 {
            // SAFETY: bounds checked above, and SyntaxKind is repr(u16) with contiguous values
            Some(unsafe { std::mem::transmute::<u16, SyntaxKind>(raw) })
        } else {
            None
        }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ApexLang {}

impl Language for ApexLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<ApexLang>;
pub type SyntaxToken = rowan::SyntaxToken<ApexLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

const TOKEN_SET_WORDS: usize = 4;
const TOKEN_SET_CAPACITY: u16 = (TOKEN_SET_WORDS * 64) as u16;

/// 256-bit bitset of token `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet([u64; TOKEN_SET_WORDS]);

impl TokenSet {
    /// Creates an empty token set.
    pub const EMPTY: TokenSet = TokenSet([0; TOKEN_SET_WORDS]);

    /// Panics at compile time if any kind's discriminant exceeds the capacity.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut words = [0u64; TOKEN_SET_WORDS];
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(
                kind < TOKEN_SET_CAPACITY,
                "SyntaxKind value exceeds TokenSet capacity"
            );
            words[(kind / 64) as usize] |= 1 << (kind % 64);
            i += 1;
        }
        TokenSet(words)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        Self::new(&[kind])
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= TOKEN_SET_CAPACITY {
            return false;
        }
        self.0[(kind / 64) as usize] & (1 << (kind % 64)) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        let mut words = self.0;
        let mut i = 0;
        while i < TOKEN_SET_WORDS {
            words[i] |= other.0[i];
            i += 1;
        }
        TokenSet(words)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for raw in 0..TOKEN_SET_CAPACITY {
            if let Some(kind) = SyntaxKind::from_raw(raw)
                && self.contains(kind)
            {
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    pub const LITERALS: TokenSet = TokenSet::new(&[
        IntegerLiteral,
        LongLiteral,
        NumberLiteral,
        StringLiteral,
        BooleanLiteral,
        KwNull,
    ]);

    /// Literal tokens that only make sense inside a query.
    pub const QUERY_ONLY_LITERALS: TokenSet = TokenSet::new(&[
        DateLiteral,
        DateTimeLiteral,
        DecimalCurrencyLiteral,
    ]);

    pub const NUMBERS: TokenSet = TokenSet::new(&[IntegerLiteral, LongLiteral, NumberLiteral]);

    pub const SIGNS: TokenSet = TokenSet::new(&[Plus, Minus]);

    pub const MODIFIER_KEYWORDS: TokenSet = TokenSet::new(&[
        KwGlobal,
        KwPublic,
        KwProtected,
        KwPrivate,
        KwTransient,
        KwStatic,
        KwAbstract,
        KwFinal,
        KwWebService,
        KwOverride,
        KwVirtual,
        KwTestMethod,
    ]);

    /// Keywords introducing a sharing modifier pair (`with sharing`).
    pub const SHARING_PREFIXES: TokenSet = TokenSet::new(&[KwWith, KwWithout, KwInherited]);

    pub const DML_KEYWORDS: TokenSet = TokenSet::new(&[
        KwInsert, KwUpdate, KwDelete, KwUndelete, KwUpsert, KwMerge,
    ]);

    pub const TRIGGER_TIMINGS: TokenSet = TokenSet::new(&[KwBefore, KwAfter]);

    pub const TRIGGER_EVENTS: TokenSet =
        TokenSet::new(&[KwInsert, KwUpdate, KwDelete, KwUndelete]);

    pub const ASSIGN_OPS: TokenSet = TokenSet::new(&[
        Assign, PlusEq, MinusEq, StarEq, SlashEq, AmpEq, PipeEq, CaretEq, ShlEq, ShrEq, UshrEq,
    ]);

    pub const EQUALITY_OPS: TokenSet = TokenSet::new(&[EqEq, EqEqEq, NotEq, NotEqEq, LtGt]);

    pub const COMPARISON_OPS: TokenSet = TokenSet::new(&[Lt, Gt, Le, Ge]);

    /// Operators accepted between a query field and its value.
    pub const SOQL_COMPARISON_OPS: TokenSet = TokenSet::new(&[Assign, NotEq, LtGt, Lt, Gt, Le, Ge]);

    pub const PREFIX_OPS: TokenSet = TokenSet::new(&[Plus, Minus, PlusPlus, MinusMinus]);

    pub const NEG_OPS: TokenSet = TokenSet::new(&[Bang, Tilde]);

    /// Tokens that can follow `(Type)` only if it was a cast.
    pub const CAST_FOLLOW: TokenSet = TokenSet::new(&[
        Ident,
        IntegralCurrencyLiteral,
        IntegerLiteral,
        LongLiteral,
        NumberLiteral,
        StringLiteral,
        BooleanLiteral,
        KwNull,
        KwNew,
        KwThis,
        KwSuper,
        ParenOpen,
        BracketOpen,
        Bang,
        Tilde,
    ]);

    /// Member-level synchronization points inside a class body.
    pub const MEMBER_RECOVERY: TokenSet = TokenSet::new(&[
        Semicolon, BraceClose, At, KwGlobal, KwPublic, KwProtected, KwPrivate, KwStatic,
        KwAbstract, KwFinal, KwOverride, KwVirtual, KwTestMethod, KwWebService, KwClass,
        KwInterface, KwEnum,
    ]);

    /// Tokens at which an expression that failed to start gives up without consuming.
    pub const EXPR_RECOVERY: TokenSet = TokenSet::new(&[
        Semicolon,
        Comma,
        ParenClose,
        BracketClose,
        BraceOpen,
        BraceClose,
        Colon,
    ]);
}
