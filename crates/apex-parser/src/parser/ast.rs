//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind`; accessors return `None` where
//! recovery left a piece missing.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

/// A typed view over one kind of node.
pub trait AstNode: Sized {
    fn cast(node: SyntaxNode) -> Option<Self>;

    fn as_cst(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }

        impl AstNode for $name {
            fn cast(node: SyntaxNode) -> Option<Self> {
                $name::cast(node)
            }

            fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

/// Closed enum over node wrappers, dispatching on kind.
macro_rules! ast_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant($variant),)+
        }

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                match node.kind() {
                    $(SyntaxKind::$variant => $variant::cast(node).map($name::$variant),)+
                    _ => None,
                }
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                match self {
                    $($name::$variant(n) => n.as_cst(),)+
                }
            }
        }

        impl AstNode for $name {
            fn cast(node: SyntaxNode) -> Option<Self> {
                $name::cast(node)
            }

            fn as_cst(&self) -> &SyntaxNode {
                $name::as_cst(self)
            }
        }
    };
}

fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
    node.children().find_map(N::cast)
}

fn children<'a, N: AstNode + 'a>(node: &'a SyntaxNode) -> impl Iterator<Item = N> + 'a {
    node.children().filter_map(N::cast)
}

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens().filter_map(|it| it.into_token())
}

fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    tokens(node).find(|t| t.kind() == kind)
}

// Entry roots
ast_node!(CompilationUnit, CompilationUnit);
ast_node!(TriggerUnit, TriggerUnit);
ast_node!(AnonymousUnit, AnonymousUnit);
ast_node!(StatementUnit, StatementUnit);
ast_node!(ExpressionUnit, ExpressionUnit);
ast_node!(QueryUnit, QueryUnit);
ast_node!(LiteralUnit, LiteralUnit);

// Declarations
ast_node!(ModifierList, ModifierList);
ast_node!(Annotation, Annotation);
ast_node!(AnnotationArgs, AnnotationArgs);
ast_node!(ElementValuePair, ElementValuePair);
ast_node!(QualifiedName, QualifiedName);
ast_node!(ClassDecl, ClassDecl);
ast_node!(InterfaceDecl, InterfaceDecl);
ast_node!(EnumDecl, EnumDecl);
ast_node!(ExtendsClause, ExtendsClause);
ast_node!(ImplementsClause, ImplementsClause);
ast_node!(ClassBody, ClassBody);
ast_node!(InterfaceBody, InterfaceBody);
ast_node!(EnumBody, EnumBody);
ast_node!(FieldDecl, FieldDecl);
ast_node!(VariableDeclarator, VariableDeclarator);
ast_node!(MethodDecl, MethodDecl);
ast_node!(ConstructorDecl, ConstructorDecl);
ast_node!(ParamList, ParamList);
ast_node!(Param, Param);
ast_node!(PropertyDecl, PropertyDecl);
ast_node!(PropertyAccessor, PropertyAccessor);
ast_node!(InitializerBlock, InitializerBlock);
ast_node!(TriggerCase, TriggerCase);

// Types
ast_node!(TypeRef, TypeRef);
ast_node!(TypeName, TypeName);
ast_node!(TypeArgs, TypeArgs);
ast_node!(ArraySubscript, ArraySubscript);

// Statements
ast_node!(Block, Block);
ast_node!(LocalVarDecl, LocalVarDecl);
ast_node!(IfStmt, IfStmt);
ast_node!(ElseClause, ElseClause);
ast_node!(SwitchStmt, SwitchStmt);
ast_node!(WhenClause, WhenClause);
ast_node!(WhenValue, WhenValue);
ast_node!(WhenTypeBinding, WhenTypeBinding);
ast_node!(ForStmt, ForStmt);
ast_node!(ForControl, ForControl);
ast_node!(EnhancedForControl, EnhancedForControl);
ast_node!(ForInit, ForInit);
ast_node!(ForUpdate, ForUpdate);
ast_node!(WhileStmt, WhileStmt);
ast_node!(DoWhileStmt, DoWhileStmt);
ast_node!(TryStmt, TryStmt);
ast_node!(CatchClause, CatchClause);
ast_node!(FinallyClause, FinallyClause);
ast_node!(ReturnStmt, ReturnStmt);
ast_node!(ThrowStmt, ThrowStmt);
ast_node!(BreakStmt, BreakStmt);
ast_node!(ContinueStmt, ContinueStmt);
ast_node!(DmlStmt, DmlStmt);
ast_node!(AccessLevel, AccessLevel);
ast_node!(RunAsStmt, RunAsStmt);
ast_node!(ExprStmt, ExprStmt);
ast_node!(EmptyStmt, EmptyStmt);

// Expressions
ast_node!(Literal, Literal);
ast_node!(SignedNumber, SignedNumber);
ast_node!(NameRef, NameRef);
ast_node!(ThisExpr, ThisExpr);
ast_node!(SuperExpr, SuperExpr);
ast_node!(ParenExpr, ParenExpr);
ast_node!(ClassRefExpr, ClassRefExpr);
ast_node!(FieldAccessExpr, FieldAccessExpr);
ast_node!(MethodCallExpr, MethodCallExpr);
ast_node!(ArgList, ArgList);
ast_node!(IndexExpr, IndexExpr);
ast_node!(NewExpr, NewExpr);
ast_node!(ArrayCreator, ArrayCreator);
ast_node!(CollectionInit, CollectionInit);
ast_node!(MapInit, MapInit);
ast_node!(MapEntry, MapEntry);
ast_node!(CastExpr, CastExpr);
ast_node!(PostfixExpr, PostfixExpr);
ast_node!(PrefixExpr, PrefixExpr);
ast_node!(NegExpr, NegExpr);
ast_node!(MultiplicativeExpr, MultiplicativeExpr);
ast_node!(AdditiveExpr, AdditiveExpr);
ast_node!(ShiftExpr, ShiftExpr);
ast_node!(ComparisonExpr, ComparisonExpr);
ast_node!(InstanceOfExpr, InstanceOfExpr);
ast_node!(EqualityExpr, EqualityExpr);
ast_node!(BitAndExpr, BitAndExpr);
ast_node!(BitXorExpr, BitXorExpr);
ast_node!(BitOrExpr, BitOrExpr);
ast_node!(LogicalAndExpr, LogicalAndExpr);
ast_node!(LogicalOrExpr, LogicalOrExpr);
ast_node!(CoalesceExpr, CoalesceExpr);
ast_node!(ConditionalExpr, ConditionalExpr);
ast_node!(AssignExpr, AssignExpr);
ast_node!(SoqlExpr, SoqlExpr);
ast_node!(SoslExpr, SoslExpr);

// SOQL
ast_node!(Query, Query);
ast_node!(SelectList, SelectList);
ast_node!(SelectField, SelectField);
ast_node!(FieldName, FieldName);
ast_node!(SoqlFunction, SoqlFunction);
ast_node!(SoqlAlias, SoqlAlias);
ast_node!(Subquery, Subquery);
ast_node!(TypeOf, TypeOf);
ast_node!(TypeOfWhen, TypeOfWhen);
ast_node!(TypeOfElse, TypeOfElse);
ast_node!(FromClause, FromClause);
ast_node!(FromEntry, FromEntry);
ast_node!(UsingScope, UsingScope);
ast_node!(WhereClause, WhereClause);
ast_node!(LogicalCondition, LogicalCondition);
ast_node!(NotCondition, NotCondition);
ast_node!(ParenCondition, ParenCondition);
ast_node!(Comparison, Comparison);
ast_node!(SoqlLiteral, SoqlLiteral);
ast_node!(DateFormula, DateFormula);
ast_node!(ValueList, ValueList);
ast_node!(BoundExpr, BoundExpr);
ast_node!(WithClause, WithClause);
ast_node!(DataCategoryFilter, DataCategoryFilter);
ast_node!(GroupByClause, GroupByClause);
ast_node!(HavingClause, HavingClause);
ast_node!(OrderByClause, OrderByClause);
ast_node!(OrderItem, OrderItem);
ast_node!(LimitClause, LimitClause);
ast_node!(OffsetClause, OffsetClause);
ast_node!(AllRowsClause, AllRowsClause);
ast_node!(ForClause, ForClause);
ast_node!(UpdateClause, UpdateClause);

// SOSL
ast_node!(SoslQuery, SoslQuery);
ast_node!(SearchGroup, SearchGroup);
ast_node!(ReturningClause, ReturningClause);
ast_node!(ReturningEntry, ReturningEntry);

ast_enum!(
    /// Top-level or nested type declaration.
    TypeDecl { ClassDecl, InterfaceDecl, EnumDecl }
);

ast_enum!(
    /// Anything that can appear in a class or interface body.
    MemberDecl {
        ClassDecl,
        InterfaceDecl,
        EnumDecl,
        FieldDecl,
        MethodDecl,
        ConstructorDecl,
        PropertyDecl,
        InitializerBlock,
    }
);

ast_enum!(
    Stmt {
        Block,
        LocalVarDecl,
        IfStmt,
        SwitchStmt,
        ForStmt,
        WhileStmt,
        DoWhileStmt,
        TryStmt,
        ReturnStmt,
        ThrowStmt,
        BreakStmt,
        ContinueStmt,
        DmlStmt,
        RunAsStmt,
        ExprStmt,
        EmptyStmt,
    }
);

ast_enum!(
    Expr {
        Literal,
        NameRef,
        ThisExpr,
        SuperExpr,
        ParenExpr,
        ClassRefExpr,
        FieldAccessExpr,
        MethodCallExpr,
        IndexExpr,
        NewExpr,
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
    }
);

ast_enum!(
    /// Entry of a SELECT list.
    SelectEntry { SelectField, Subquery, TypeOf }
);

ast_enum!(
    /// A filter in WHERE, HAVING or WITH.
    Condition { LogicalCondition, NotCondition, ParenCondition, Comparison }
);

ast_enum!(
    /// Right-hand side of a query comparison.
    SoqlValue { SoqlLiteral, SignedNumber, DateFormula, ValueList, Subquery, BoundExpr }
);

/// Kind of an Apex literal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Integer,
    Long,
    Number,
    String,
    Boolean,
    Null,
    Date,
    DateTime,
    Currency,
}

impl LiteralKind {
    fn from_token(kind: SyntaxKind) -> Option<Self> {
        let literal = match kind {
            SyntaxKind::IntegerLiteral => Self::Integer,
            SyntaxKind::LongLiteral => Self::Long,
            SyntaxKind::NumberLiteral => Self::Number,
            SyntaxKind::StringLiteral => Self::String,
            SyntaxKind::BooleanLiteral => Self::Boolean,
            SyntaxKind::KwNull => Self::Null,
            SyntaxKind::DateLiteral => Self::Date,
            SyntaxKind::DateTimeLiteral => Self::DateTime,
            SyntaxKind::IntegralCurrencyLiteral | SyntaxKind::DecimalCurrencyLiteral => {
                Self::Currency
            }
            _ => return None,
        };
        Some(literal)
    }
}

impl CompilationUnit {
    pub fn type_decl(&self) -> Option<TypeDecl> {
        child(&self.0)
    }
}

impl TriggerUnit {
    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind() == SyntaxKind::Ident)
    }

    /// The SObject the trigger listens on.
    pub fn object(&self) -> Option<SyntaxToken> {
        tokens(&self.0)
            .filter(|t| t.kind() == SyntaxKind::Ident)
            .nth(1)
    }

    pub fn cases(&self) -> impl Iterator<Item = TriggerCase> + '_ {
        children(&self.0)
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }
}

impl TriggerCase {
    /// `before` or `after`
    pub fn timing(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| matches!(t.kind(), SyntaxKind::KwBefore | SyntaxKind::KwAfter))
    }

    /// `insert`, `update`, `delete` or `undelete`
    pub fn event(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| {
            matches!(
                t.kind(),
                SyntaxKind::KwInsert
                    | SyntaxKind::KwUpdate
                    | SyntaxKind::KwDelete
                    | SyntaxKind::KwUndelete
            )
        })
    }
}

impl AnonymousUnit {
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        children(&self.0)
    }
}

impl StatementUnit {
    pub fn statement(&self) -> Option<Stmt> {
        child(&self.0)
    }
}

impl ExpressionUnit {
    pub fn expression(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl QueryUnit {
    pub fn query(&self) -> Option<Query> {
        child(&self.0)
    }
}

impl LiteralUnit {
    pub fn literal(&self) -> Option<Literal> {
        child(&self.0)
    }
}

impl ModifierList {
    pub fn annotations(&self) -> impl Iterator<Item = Annotation> + '_ {
        children(&self.0)
    }

    /// Modifier keyword tokens, including both words of `with sharing`.
    pub fn keywords(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens(&self.0).filter(|t| t.kind().is_keyword())
    }

    pub fn has(&self, kind: SyntaxKind) -> bool {
        self.keywords().any(|t| t.kind() == kind)
    }
}

impl Annotation {
    pub fn name(&self) -> Option<QualifiedName> {
        child(&self.0)
    }

    pub fn args(&self) -> Option<AnnotationArgs> {
        child(&self.0)
    }
}

impl AnnotationArgs {
    pub fn pairs(&self) -> impl Iterator<Item = ElementValuePair> + '_ {
        children(&self.0)
    }

    /// The single unnamed value, as in `@Deprecated('reason')`.
    pub fn value(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl ElementValuePair {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    pub fn value(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl QualifiedName {
    pub fn segments(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        tokens(&self.0).filter(|t| t.kind() == SyntaxKind::Ident)
    }

    /// Segments joined with `.`, trivia dropped.
    pub fn text(&self) -> String {
        self.segments()
            .map(|t| t.text().to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl TypeDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(self.as_cst(), SyntaxKind::Ident)
    }

    pub fn modifiers(&self) -> Option<ModifierList> {
        child(self.as_cst())
    }
}

impl ClassDecl {
    pub fn modifiers(&self) -> Option<ModifierList> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    pub fn extends(&self) -> Option<TypeRef> {
        child::<ExtendsClause>(&self.0).and_then(|c| child(&c.0))
    }

    pub fn implements(&self) -> Vec<TypeRef> {
        child::<ImplementsClause>(&self.0)
            .map(|c| children(&c.0).collect())
            .unwrap_or_default()
    }

    pub fn body(&self) -> Option<ClassBody> {
        child(&self.0)
    }
}

impl ClassBody {
    pub fn members(&self) -> impl Iterator<Item = MemberDecl> + '_ {
        children(&self.0)
    }
}

impl InterfaceDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    pub fn extends(&self) -> Vec<TypeRef> {
        child::<ExtendsClause>(&self.0)
            .map(|c| children(&c.0).collect())
            .unwrap_or_default()
    }

    pub fn body(&self) -> Option<InterfaceBody> {
        child(&self.0)
    }
}

impl InterfaceBody {
    pub fn members(&self) -> impl Iterator<Item = MemberDecl> + '_ {
        children(&self.0)
    }
}

impl EnumDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    pub fn constants(&self) -> Vec<SyntaxToken> {
        child::<EnumBody>(&self.0)
            .map(|body| tokens(&body.0).filter(|t| t.kind() == SyntaxKind::Ident).collect())
            .unwrap_or_default()
    }
}

impl FieldDecl {
    pub fn modifiers(&self) -> Option<ModifierList> {
        child(&self.0)
    }

    pub fn type_ref(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn declarators(&self) -> impl Iterator<Item = VariableDeclarator> + '_ {
        children(&self.0)
    }
}

impl VariableDeclarator {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    pub fn initializer(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl MethodDecl {
    pub fn modifiers(&self) -> Option<ModifierList> {
        child(&self.0)
    }

    /// `None` for `void` methods.
    pub fn return_type(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn is_void(&self) -> bool {
        token(&self.0, SyntaxKind::KwVoid).is_some()
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        child::<ParamList>(&self.0)
            .into_iter()
            .flat_map(|list| children::<Param>(&list.0).collect::<Vec<_>>())
    }

    /// `None` for abstract and interface methods.
    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }
}

impl ConstructorDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    pub fn params(&self) -> Option<ParamList> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }
}

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        children(&self.0)
    }
}

impl Param {
    pub fn type_ref(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }
}

impl PropertyDecl {
    pub fn type_ref(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    pub fn accessors(&self) -> impl Iterator<Item = PropertyAccessor> + '_ {
        children(&self.0)
    }
}

impl PropertyAccessor {
    /// `get` or `set`
    pub fn keyword(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| matches!(t.kind(), SyntaxKind::KwGet | SyntaxKind::KwSet))
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }
}

impl InitializerBlock {
    pub fn is_static(&self) -> bool {
        token(&self.0, SyntaxKind::KwStatic).is_some()
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }
}

impl TypeRef {
    /// Dot-separated segments: `Schema.SObjectType` has two.
    pub fn segments(&self) -> impl Iterator<Item = TypeName> + '_ {
        children(&self.0)
    }

    pub fn array_depth(&self) -> usize {
        children::<ArraySubscript>(&self.0).count()
    }
}

impl TypeName {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    pub fn type_args(&self) -> Vec<TypeRef> {
        child::<TypeArgs>(&self.0)
            .map(|args| children(&args.0).collect())
            .unwrap_or_default()
    }
}

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        children(&self.0)
    }
}

impl LocalVarDecl {
    pub fn type_ref(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn declarators(&self) -> impl Iterator<Item = VariableDeclarator> + '_ {
        children(&self.0)
    }
}

impl IfStmt {
    pub fn condition(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn then_branch(&self) -> Option<Stmt> {
        child(&self.0)
    }

    pub fn else_branch(&self) -> Option<Stmt> {
        child::<ElseClause>(&self.0).and_then(|c| child(&c.0))
    }
}

impl SwitchStmt {
    pub fn subject(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn when_clauses(&self) -> impl Iterator<Item = WhenClause> + '_ {
        children(&self.0)
    }
}

impl WhenClause {
    pub fn is_else(&self) -> bool {
        token(&self.0, SyntaxKind::KwElse).is_some()
    }

    pub fn values(&self) -> impl Iterator<Item = WhenValue> + '_ {
        children(&self.0)
    }

    pub fn type_binding(&self) -> Option<WhenTypeBinding> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }
}

impl WhenValue {
    /// The value with any parentheses removed.
    pub fn value(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }
}

impl WhenTypeBinding {
    pub fn type_ref(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }
}

impl ForStmt {
    pub fn control(&self) -> Option<ForControl> {
        child(&self.0)
    }

    pub fn enhanced_control(&self) -> Option<EnhancedForControl> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<Stmt> {
        child(&self.0)
    }
}

impl ForControl {
    pub fn init(&self) -> Option<ForInit> {
        child(&self.0)
    }

    pub fn condition(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn update(&self) -> Option<ForUpdate> {
        child(&self.0)
    }
}

impl EnhancedForControl {
    pub fn type_ref(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    pub fn iterable(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl WhileStmt {
    pub fn condition(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<Stmt> {
        child(&self.0)
    }
}

impl DoWhileStmt {
    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }

    pub fn condition(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl TryStmt {
    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }

    pub fn catches(&self) -> impl Iterator<Item = CatchClause> + '_ {
        children(&self.0)
    }

    pub fn finally(&self) -> Option<FinallyClause> {
        child(&self.0)
    }
}

impl CatchClause {
    pub fn type_ref(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }
}

impl ReturnStmt {
    pub fn value(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl ThrowStmt {
    pub fn value(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl DmlStmt {
    /// `insert`, `update`, `delete`, `undelete`, `upsert` or `merge`
    pub fn keyword(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| t.kind().is_reserved_keyword())
    }

    /// The `as user` / `as system` suffix keyword.
    pub fn access_level(&self) -> Option<SyntaxToken> {
        child::<AccessLevel>(&self.0).and_then(|level| {
            tokens(&level.0).find(|t| matches!(t.kind(), SyntaxKind::KwUser | SyntaxKind::KwSystem))
        })
    }

    /// Records, then the duplicate for `merge`.
    pub fn operands(&self) -> impl Iterator<Item = Expr> + '_ {
        children(&self.0)
    }

    /// External id field of an `upsert`.
    pub fn key_field(&self) -> Option<QualifiedName> {
        child(&self.0)
    }
}

impl RunAsStmt {
    pub fn args(&self) -> Option<ArgList> {
        child(&self.0)
    }

    pub fn body(&self) -> Option<Block> {
        child(&self.0)
    }
}

impl ExprStmt {
    pub fn expr(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl Literal {
    pub fn token(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| LiteralKind::from_token(t.kind()).is_some())
    }

    pub fn kind(&self) -> Option<LiteralKind> {
        self.token().and_then(|t| LiteralKind::from_token(t.kind()))
    }
}

impl SoqlLiteral {
    pub fn token(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| LiteralKind::from_token(t.kind()).is_some())
    }

    pub fn kind(&self) -> Option<LiteralKind> {
        self.token().and_then(|t| LiteralKind::from_token(t.kind()))
    }
}

impl SignedNumber {
    /// `true` when an odd number of `-` signs precede the number.
    pub fn is_negative(&self) -> bool {
        tokens(&self.0)
            .filter(|t| t.kind() == SyntaxKind::Minus)
            .count()
            % 2
            == 1
    }

    pub fn number(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| {
            matches!(
                t.kind(),
                SyntaxKind::IntegerLiteral | SyntaxKind::LongLiteral | SyntaxKind::NumberLiteral
            )
        })
    }
}

impl NameRef {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }
}

impl ParenExpr {
    pub fn inner(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl ClassRefExpr {
    pub fn target(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl FieldAccessExpr {
    pub fn receiver(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn is_safe_navigation(&self) -> bool {
        token(&self.0, SyntaxKind::QuestionDot).is_some()
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }
}

impl MethodCallExpr {
    /// `None` for unqualified calls such as `foo(1)` or `this(1)`.
    pub fn receiver(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| {
            matches!(
                t.kind(),
                SyntaxKind::Ident | SyntaxKind::KwThis | SyntaxKind::KwSuper
            )
        })
    }

    pub fn args(&self) -> Option<ArgList> {
        child(&self.0)
    }
}

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        children(&self.0)
    }
}

impl IndexExpr {
    pub fn base(&self) -> Option<Expr> {
        children(&self.0).next()
    }

    pub fn index(&self) -> Option<Expr> {
        children(&self.0).nth(1)
    }
}

impl NewExpr {
    pub fn type_ref(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn args(&self) -> Option<ArgList> {
        child(&self.0)
    }

    pub fn array_size(&self) -> Option<Expr> {
        child::<ArrayCreator>(&self.0).and_then(|c| child(&c.0))
    }

    pub fn collection_init(&self) -> Option<CollectionInit> {
        child(&self.0)
    }

    pub fn map_init(&self) -> Option<MapInit> {
        child(&self.0)
    }
}

impl CollectionInit {
    pub fn elements(&self) -> impl Iterator<Item = Expr> + '_ {
        children(&self.0)
    }
}

impl MapInit {
    pub fn entries(&self) -> impl Iterator<Item = MapEntry> + '_ {
        children(&self.0)
    }
}

impl MapEntry {
    pub fn key(&self) -> Option<Expr> {
        children(&self.0).next()
    }

    pub fn value(&self) -> Option<Expr> {
        children(&self.0).nth(1)
    }
}

impl CastExpr {
    pub fn type_ref(&self) -> Option<TypeRef> {
        child(&self.0)
    }

    pub fn operand(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl PostfixExpr {
    pub fn operand(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn op(&self) -> Option<SyntaxToken> {
        tokens(&self.0).last()
    }
}

impl PrefixExpr {
    pub fn op(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| !t.kind().is_trivia())
    }

    pub fn operand(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl NegExpr {
    pub fn op(&self) -> Option<SyntaxToken> {
        tokens(&self.0).find(|t| !t.kind().is_trivia())
    }

    pub fn operand(&self) -> Option<Expr> {
        child(&self.0)
    }
}

/// Accessors shared by nodes with two operands around an operator.
macro_rules! binary_accessors {
    ($($name:ident),+ $(,)?) => {
        $(
            impl $name {
                pub fn lhs(&self) -> Option<Expr> {
                    children(&self.0).next()
                }

                pub fn rhs(&self) -> Option<Expr> {
                    children(&self.0).nth(1)
                }

                /// Operator tokens; a shift spells its operator with several `<` or `>`.
                pub fn op(&self) -> Vec<SyntaxToken> {
                    tokens(&self.0).filter(|t| !t.kind().is_trivia()).collect()
                }
            }
        )+
    };
}

binary_accessors!(
    MultiplicativeExpr,
    AdditiveExpr,
    ShiftExpr,
    ComparisonExpr,
    EqualityExpr,
    BitAndExpr,
    BitXorExpr,
    BitOrExpr,
    LogicalAndExpr,
    LogicalOrExpr,
    CoalesceExpr,
    AssignExpr,
);

impl InstanceOfExpr {
    pub fn operand(&self) -> Option<Expr> {
        child(&self.0)
    }

    pub fn type_ref(&self) -> Option<TypeRef> {
        child(&self.0)
    }
}

impl ConditionalExpr {
    pub fn condition(&self) -> Option<Expr> {
        children(&self.0).next()
    }

    pub fn then_branch(&self) -> Option<Expr> {
        children(&self.0).nth(1)
    }

    pub fn else_branch(&self) -> Option<Expr> {
        children(&self.0).nth(2)
    }
}

impl SoqlExpr {
    pub fn query(&self) -> Option<Query> {
        child(&self.0)
    }
}

impl SoslExpr {
    pub fn query(&self) -> Option<SoslQuery> {
        child(&self.0)
    }
}

impl Query {
    pub fn select_list(&self) -> Option<SelectList> {
        child(&self.0)
    }

    pub fn from_clause(&self) -> Option<FromClause> {
        child(&self.0)
    }

    pub fn using_scope(&self) -> Option<UsingScope> {
        child(&self.0)
    }

    pub fn where_clause(&self) -> Option<WhereClause> {
        child(&self.0)
    }

    pub fn with_clauses(&self) -> impl Iterator<Item = WithClause> + '_ {
        children(&self.0)
    }

    pub fn group_by(&self) -> Option<GroupByClause> {
        child(&self.0)
    }

    pub fn order_by(&self) -> Option<OrderByClause> {
        child(&self.0)
    }

    pub fn limit(&self) -> Option<LimitClause> {
        child(&self.0)
    }

    pub fn offset(&self) -> Option<OffsetClause> {
        child(&self.0)
    }

    pub fn all_rows(&self) -> bool {
        child::<AllRowsClause>(&self.0).is_some()
    }

    pub fn for_clause(&self) -> Option<ForClause> {
        child(&self.0)
    }

    pub fn update_clause(&self) -> Option<UpdateClause> {
        child(&self.0)
    }
}

impl SelectList {
    pub fn entries(&self) -> impl Iterator<Item = SelectEntry> + '_ {
        children(&self.0)
    }
}

impl SelectField {
    pub fn field(&self) -> Option<FieldName> {
        child(&self.0)
    }

    pub fn function(&self) -> Option<SoqlFunction> {
        child(&self.0)
    }

    pub fn alias(&self) -> Option<SyntaxToken> {
        child::<SoqlAlias>(&self.0).and_then(|a| token(&a.0, SyntaxKind::Ident))
    }
}

impl FieldName {
    /// Path segments joined with `.`.
    pub fn text(&self) -> String {
        tokens(&self.0)
            .filter(|t| t.kind() == SyntaxKind::Ident)
            .map(|t| t.text().to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl SoqlFunction {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    pub fn args(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children()
    }
}

impl Subquery {
    pub fn query(&self) -> Option<Query> {
        child(&self.0)
    }
}

impl FromClause {
    pub fn entries(&self) -> impl Iterator<Item = FromEntry> + '_ {
        children(&self.0)
    }
}

impl FromEntry {
    pub fn object(&self) -> Option<FieldName> {
        child(&self.0)
    }

    pub fn alias(&self) -> Option<SyntaxToken> {
        child::<SoqlAlias>(&self.0).and_then(|a| token(&a.0, SyntaxKind::Ident))
    }
}

impl WhereClause {
    pub fn condition(&self) -> Option<Condition> {
        child(&self.0)
    }
}

impl HavingClause {
    pub fn condition(&self) -> Option<Condition> {
        child(&self.0)
    }
}

impl LogicalCondition {
    /// `KwAnd` or `KwOr`, whichever joins the first two operands.
    pub fn operator(&self) -> Option<SyntaxKind> {
        tokens(&self.0)
            .map(|t| t.kind())
            .find(|k| matches!(k, SyntaxKind::KwAnd | SyntaxKind::KwOr))
    }

    pub fn operands(&self) -> impl Iterator<Item = Condition> + '_ {
        children(&self.0)
    }
}

impl NotCondition {
    pub fn inner(&self) -> Option<Condition> {
        child(&self.0)
    }
}

impl ParenCondition {
    pub fn inner(&self) -> Option<Condition> {
        child(&self.0)
    }
}

impl Comparison {
    pub fn field(&self) -> Option<FieldName> {
        child(&self.0)
    }

    /// Operator tokens: one symbol, or one or two keywords such as `NOT IN`.
    pub fn operator(&self) -> Vec<SyntaxToken> {
        tokens(&self.0).filter(|t| !t.kind().is_trivia()).collect()
    }

    pub fn value(&self) -> Option<SoqlValue> {
        child(&self.0)
    }
}

impl DateFormula {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Ident)
    }

    pub fn periods(&self) -> Option<SyntaxToken> {
        self.0
            .descendants_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind() == SyntaxKind::IntegerLiteral)
    }
}

impl ValueList {
    pub fn values(&self) -> impl Iterator<Item = SoqlValue> + '_ {
        children(&self.0)
    }
}

impl BoundExpr {
    pub fn expr(&self) -> Option<Expr> {
        child(&self.0)
    }
}

impl WithClause {
    /// The mode keyword of `WITH SECURITY_ENFORCED`, `WITH USER_MODE` or `WITH SYSTEM_MODE`.
    pub fn access_mode(&self) -> Option<SyntaxKind> {
        tokens(&self.0).map(|t| t.kind()).find(|k| {
            matches!(
                k,
                SyntaxKind::KwSecurityEnforced | SyntaxKind::KwUserMode | SyntaxKind::KwSystemMode
            )
        })
    }

    pub fn filter(&self) -> Option<Condition> {
        child(&self.0)
    }

    pub fn data_categories(&self) -> impl Iterator<Item = DataCategoryFilter> + '_ {
        children(&self.0)
    }
}

impl OrderByClause {
    pub fn items(&self) -> impl Iterator<Item = OrderItem> + '_ {
        children(&self.0)
    }
}

impl OrderItem {
    pub fn field(&self) -> Option<FieldName> {
        child(&self.0)
    }

    pub fn is_descending(&self) -> bool {
        token(&self.0, SyntaxKind::KwDesc).is_some()
    }

    /// `Some(true)` for `NULLS FIRST`, `Some(false)` for `NULLS LAST`.
    pub fn nulls_first(&self) -> Option<bool> {
        tokens(&self.0).find_map(|t| match t.kind() {
            SyntaxKind::KwFirst => Some(true),
            SyntaxKind::KwLast => Some(false),
            _ => None,
        })
    }
}

impl LimitClause {
    pub fn value(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }
}

impl OffsetClause {
    pub fn value(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }
}

impl SoslQuery {
    pub fn search_term(&self) -> Option<SyntaxNode> {
        self.0.children().next()
    }

    pub fn search_group(&self) -> Option<SearchGroup> {
        child(&self.0)
    }

    pub fn returning(&self) -> impl Iterator<Item = ReturningEntry> + '_ {
        child::<ReturningClause>(&self.0)
            .into_iter()
            .flat_map(|c| children::<ReturningEntry>(&c.0).collect::<Vec<_>>())
    }
}

impl ReturningEntry {
    pub fn object(&self) -> Option<FieldName> {
        child(&self.0)
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        children(&self.0).skip(1)
    }
}
