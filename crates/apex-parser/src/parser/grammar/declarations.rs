//! Type declarations, members and modifiers.

use rowan::Checkpoint;

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::token_sets::{MEMBER_RECOVERY, MODIFIER_KEYWORDS, SHARING_PREFIXES};
use crate::parser::cst::{SyntaxKind, TokenSet};

const ACCESSOR_RECOVERY: TokenSet = TokenSet::new(&[
    SyntaxKind::BraceClose,
    SyntaxKind::KwGet,
    SyntaxKind::KwSet,
]);

/// What follows a member's modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberShape {
    Class,
    Interface,
    Enum,
    Constructor,
    Method,
    Property,
    Field,
}

impl Parser<'_, '_> {
    /// A source file holds exactly one top-level type.
    pub(crate) fn parse_compilation_unit_body(&mut self) {
        let checkpoint = self.checkpoint();
        let has_modifiers = self.parse_modifiers();

        match self.current() {
            SyntaxKind::KwClass => self.parse_class_decl(checkpoint),
            SyntaxKind::KwInterface => self.parse_interface_decl(checkpoint),
            SyntaxKind::KwEnum => self.parse_enum_decl(checkpoint),
            _ => {
                let found = self.describe_current();
                self.error_msg(DiagnosticKind::ExpectedDeclaration, format!("found {found}"));
                if has_modifiers {
                    self.start_node_at(checkpoint, SyntaxKind::Error);
                    self.finish_node();
                }
            }
        }
    }

    /// Annotations, modifier keywords and `with|without|inherited sharing`, in any order.
    ///
    /// Returns whether a `ModifierList` was produced.
    pub(crate) fn parse_modifiers(&mut self) -> bool {
        let checkpoint = self.checkpoint();
        let mut any = false;

        loop {
            match self.current() {
                SyntaxKind::At => self.parse_annotation(),
                kind if MODIFIER_KEYWORDS.contains(kind) => self.bump(),
                kind if SHARING_PREFIXES.contains(kind) && self.next_is(SyntaxKind::KwSharing) => {
                    self.bump();
                    self.bump();
                }
                _ => break,
            }
            any = true;
        }

        if any {
            self.start_node_at(checkpoint, SyntaxKind::ModifierList);
            self.finish_node();
        }
        any
    }

    /// `@Name` or `@Name(value)` or `@Name(key=value key2=value2)`
    fn parse_annotation(&mut self) {
        self.start_node(SyntaxKind::Annotation);
        self.bump();
        self.parse_qualified_name();

        if self.at(SyntaxKind::ParenOpen) {
            self.start_node(SyntaxKind::AnnotationArgs);
            self.open_delimiter(SyntaxKind::ParenOpen);
            if self.at_name() && self.next_is(SyntaxKind::Assign) {
                while self.at_name() && self.next_is(SyntaxKind::Assign) {
                    self.start_node(SyntaxKind::ElementValuePair);
                    self.bump_name();
                    self.bump();
                    self.parse_expr();
                    self.finish_node();
                    self.eat(SyntaxKind::Comma);
                }
            } else if !self.at(SyntaxKind::ParenClose) {
                self.parse_expr();
            }
            self.close_delimiter(SyntaxKind::ParenClose, "annotation arguments");
            self.finish_node();
        }

        self.finish_node();
    }

    /// `class Name [extends T] [implements A, B] { members }`
    fn parse_class_decl(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::ClassDecl);
        self.bump();
        self.expect_name("class name");

        if self.at(SyntaxKind::KwExtends) {
            self.start_node(SyntaxKind::ExtendsClause);
            self.bump();
            self.parse_type_ref();
            self.finish_node();
        }
        if self.at(SyntaxKind::KwImplements) {
            self.start_node(SyntaxKind::ImplementsClause);
            self.bump();
            self.parse_type_list();
            self.finish_node();
        }

        self.parse_member_body(SyntaxKind::ClassBody, "class body");
        self.finish_node();
    }

    /// `interface Name [extends A, B] { signatures }`
    fn parse_interface_decl(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::InterfaceDecl);
        self.bump();
        self.expect_name("interface name");

        if self.at(SyntaxKind::KwExtends) {
            self.start_node(SyntaxKind::ExtendsClause);
            self.bump();
            self.parse_type_list();
            self.finish_node();
        }

        self.parse_member_body(SyntaxKind::InterfaceBody, "interface body");
        self.finish_node();
    }

    /// `enum Name { A, B, C }`
    fn parse_enum_decl(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::EnumDecl);
        self.bump();
        self.expect_name("enum name");

        self.start_node(SyntaxKind::EnumBody);
        if self.at(SyntaxKind::BraceOpen) {
            self.open_delimiter(SyntaxKind::BraceOpen);
            if !self.at(SyntaxKind::BraceClose) {
                loop {
                    self.expect_name("enum constant");
                    if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                        break;
                    }
                }
            }
            self.close_delimiter(SyntaxKind::BraceClose, "enum body");
        } else {
            let message = self.expected_message("`{`");
            self.error_msg(DiagnosticKind::UnexpectedToken, message);
        }
        self.finish_node();

        self.finish_node();
    }

    fn parse_type_list(&mut self) {
        loop {
            self.parse_type_ref();
            if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                break;
            }
        }
    }

    fn parse_member_body(&mut self, kind: SyntaxKind, started: &str) {
        self.start_node(kind);
        if !self.at(SyntaxKind::BraceOpen) {
            let message = self.expected_message("`{`");
            self.error_msg(DiagnosticKind::UnexpectedToken, message);
            self.finish_node();
            return;
        }

        self.open_delimiter(SyntaxKind::BraceOpen);
        while !self.should_stop() && !self.at(SyntaxKind::BraceClose) {
            self.parse_member();
        }
        self.close_delimiter(SyntaxKind::BraceClose, started);
        self.finish_node();
    }

    /// One class or interface member. Consumes at least one token unless at `}`.
    fn parse_member(&mut self) {
        if !self.enter_recursion() {
            return;
        }

        match self.current() {
            SyntaxKind::Semicolon => self.bump(),
            SyntaxKind::BraceOpen => {
                self.start_node(SyntaxKind::InitializerBlock);
                self.parse_block();
                self.finish_node();
            }
            SyntaxKind::KwStatic if self.next_is(SyntaxKind::BraceOpen) => {
                self.start_node(SyntaxKind::InitializerBlock);
                self.bump();
                self.parse_block();
                self.finish_node();
            }
            _ => self.parse_member_decl(),
        }

        self.exit_recursion();
    }

    fn parse_member_decl(&mut self) {
        let checkpoint = self.checkpoint();
        let has_modifiers = self.parse_modifiers();

        let Some(shape) = self.member_shape() else {
            let found = self.describe_current();
            let message = format!("found {found}");
            if has_modifiers {
                self.start_node_at(checkpoint, SyntaxKind::Error);
                self.error_recover(DiagnosticKind::ExpectedMember, message, MEMBER_RECOVERY);
                self.finish_node();
            } else {
                self.error_recover(DiagnosticKind::ExpectedMember, message, MEMBER_RECOVERY);
            }
            return;
        };

        match shape {
            MemberShape::Class => self.parse_class_decl(checkpoint),
            MemberShape::Interface => self.parse_interface_decl(checkpoint),
            MemberShape::Enum => self.parse_enum_decl(checkpoint),
            MemberShape::Constructor => self.parse_constructor_decl(checkpoint),
            MemberShape::Method => self.parse_method_decl(checkpoint),
            MemberShape::Property => self.parse_property_decl(checkpoint),
            MemberShape::Field => self.parse_field_decl(checkpoint),
        }
    }

    /// Looks past the type and name to decide the member kind.
    fn member_shape(&mut self) -> Option<MemberShape> {
        match self.current() {
            SyntaxKind::KwClass => return Some(MemberShape::Class),
            SyntaxKind::KwInterface => return Some(MemberShape::Interface),
            SyntaxKind::KwEnum => return Some(MemberShape::Enum),
            SyntaxKind::KwVoid => return Some(MemberShape::Method),
            kind if kind.is_name() && self.next_is(SyntaxKind::ParenOpen) => {
                return Some(MemberShape::Constructor);
            }
            _ => {}
        }

        let start = self.scan_start();
        let name = self.scan_type(start)?;
        if !self.kind_at(name).is_name() {
            return None;
        }
        let shape = match self.kind_at(self.significant_after(name)) {
            SyntaxKind::ParenOpen => MemberShape::Method,
            SyntaxKind::BraceOpen => MemberShape::Property,
            _ => MemberShape::Field,
        };
        Some(shape)
    }

    fn parse_constructor_decl(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::ConstructorDecl);
        self.bump_name();
        self.parse_param_list();
        self.parse_block();
        self.finish_node();
    }

    /// Abstract and interface methods end with `;` instead of a body.
    fn parse_method_decl(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::MethodDecl);
        if self.at(SyntaxKind::KwVoid) {
            self.bump();
        } else {
            self.parse_type_ref();
        }
        self.expect_name("method name");
        self.parse_param_list();
        if self.at(SyntaxKind::BraceOpen) {
            self.parse_block();
        } else {
            self.expect(SyntaxKind::Semicolon, "method body or `;`");
        }
        self.finish_node();
    }

    /// `(final Type a, Type b)`
    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::ParamList);
        if !self.at(SyntaxKind::ParenOpen) {
            let message = self.expected_message("`(`");
            self.error_msg(DiagnosticKind::UnexpectedToken, message);
            self.finish_node();
            return;
        }

        self.open_delimiter(SyntaxKind::ParenOpen);
        if !self.at(SyntaxKind::ParenClose) {
            loop {
                self.start_node(SyntaxKind::Param);
                self.parse_modifiers();
                self.parse_type_ref();
                self.expect_name("parameter name");
                self.finish_node();
                if self.should_stop() || !self.eat(SyntaxKind::Comma) {
                    break;
                }
            }
        }
        self.close_delimiter(SyntaxKind::ParenClose, "parameter list");
        self.finish_node();
    }

    fn parse_field_decl(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::FieldDecl);
        self.parse_type_ref();
        self.parse_variable_declarators();
        self.expect(SyntaxKind::Semicolon, "`;`");
        self.finish_node();
    }

    /// `Type Name { get; private set { ... } }`
    fn parse_property_decl(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::PropertyDecl);
        self.parse_type_ref();
        self.expect_name("property name");

        self.open_delimiter(SyntaxKind::BraceOpen);
        while !self.should_stop() && !self.at(SyntaxKind::BraceClose) {
            let accessor = self.checkpoint();
            let has_modifiers = self.parse_modifiers();
            if matches!(self.current(), SyntaxKind::KwGet | SyntaxKind::KwSet) {
                self.start_node_at(accessor, SyntaxKind::PropertyAccessor);
                self.bump();
                if self.at(SyntaxKind::BraceOpen) {
                    self.parse_block();
                } else {
                    self.expect(SyntaxKind::Semicolon, "`;` or accessor body");
                }
                self.finish_node();
            } else if has_modifiers {
                let message = self.expected_message("`get` or `set`");
                self.error_msg(DiagnosticKind::UnexpectedToken, message);
            } else {
                let message = self.expected_message("`get` or `set`");
                self.error_recover(DiagnosticKind::UnexpectedToken, message, ACCESSOR_RECOVERY);
            }
        }
        self.close_delimiter(SyntaxKind::BraceClose, "property");

        self.finish_node();
    }
}
