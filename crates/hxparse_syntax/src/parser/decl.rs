/// Declaration parsing methods.
///
/// This chunk implements:
/// - Module-level statements (`package`, `import`, `using`)
/// - Metadata (`@name`, `@:name(args)`) and modifier lists
/// - Class declarations, class bodies, fields and methods (including local `var` / `function` forms)
/// - Typedefs, type parameters, parameter lists
/// - Preprocessor directives (`#if cond`, `#elseif cond`, `#else`, `#end`)
///
/// ## Notes
/// - Metadata and modifiers are parsed before the declaration kind is known; the declaration node is opened
///   retroactively at a checkpoint so they become its leading children.
/// - Local `var`/`final` and `function name` reuse the field and method productions with a presentation alias.

/// Where a declaration appears; decides which declaration kinds are allowed and which alias is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Module,
    ClassBody,
    Local,
}

/// What a metadata/modifier prefix contained.
#[derive(Debug, Default, Clone, Copy)]
struct Prefix {
    metadata: usize,
    modifiers: usize,
}

impl<'a> Parser<'a> {
    // ========================================================================
    // Module-level statements
    // ========================================================================

    /// Parse one top-level item.
    fn top_level_item(&mut self) -> PResult<()> {
        self.nonterminal(|p| match p.peek_kind() {
            TokenKind::Directive(_) => p.preprocessor_directive(),
            TokenKind::Keyword(KeywordId::Package) => p.package_statement(),
            TokenKind::Keyword(KeywordId::Import) => p.import_statement(),
            TokenKind::Keyword(KeywordId::Using) => p.using_statement(),
            _ if p.at_declaration_start(Scope::Module) => p.declaration(Scope::Module),
            _ => p.statement_inner(),
        })
    }

    /// `package a.b;` or `package;`
    fn package_statement(&mut self) -> PResult<()> {
        self.start(SyntaxKind::PackageStatement);
        self.bump();
        if self.check_name() {
            self.dotted_path(FieldName::Path)?;
        }
        self.terminator()?;
        self.finish();
        Ok(())
    }

    /// `import a.b.C;`, `import a.b.*;`, `import a.b.C as D;`, `import a.b.C in D;`
    fn import_statement(&mut self) -> PResult<()> {
        self.start(SyntaxKind::ImportStatement);
        self.bump();
        self.dotted_path(FieldName::Name)?;
        if self.check_keyword(KeywordId::As) || self.check_keyword(KeywordId::In) {
            self.bump();
            self.expect_ident(FieldName::Alias, "import alias")?;
        }
        self.terminator()?;
        self.finish();
        Ok(())
    }

    /// `using a.b.Tools;`
    fn using_statement(&mut self) -> PResult<()> {
        self.start(SyntaxKind::UsingStatement);
        self.bump();
        self.dotted_path(FieldName::Name)?;
        self.terminator()?;
        self.finish();
        Ok(())
    }

    /// Dotted path: every segment but the last under `path`; the last under `last`, or `*` under `wildcard`.
    ///
    /// Segments may be keywords (`haxe.macro.Expr`).
    fn dotted_path(&mut self, last: FieldName) -> PResult<()> {
        loop {
            if !self.check_name() {
                return Err(self.expected("path segment"));
            }
            let after_dot = self.nth_kind(2);
            let more = self.nth_kind(1).is_punctuation(PunctuationId::Dot)
                && (is_name(after_dot) || after_dot.is_operator(OperatorId::Star));
            if !more {
                self.bump_field(last);
                return Ok(());
            }
            self.bump_field(FieldName::Path);
            self.bump(); // .
            if self.check_op(OperatorId::Star) {
                self.bump_field(FieldName::Wildcard);
                return Ok(());
            }
        }
    }

    /// Require a statement terminator, unless the scan context says it may be omitted here.
    fn terminator(&mut self) -> PResult<()> {
        if self.match_punct(PunctuationId::Semicolon) || self.scan.semicolon_optional(self.peek_kind()) {
            Ok(())
        } else {
            Err(self.expected("`;`"))
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    /// Return `true` if the current token starts a declaration in `scope`.
    fn at_declaration_start(&self, scope: Scope) -> bool {
        match self.peek_kind() {
            TokenKind::Punctuation(PunctuationId::At) => true,
            TokenKind::Keyword(KeywordId::Var) => true,
            TokenKind::Keyword(KeywordId::Final) => {
                let next = self.nth_kind(1);
                next.is_ident() || next.keyword_id().is_some_and(starts_declaration)
            }
            TokenKind::Keyword(KeywordId::Function) => self.nth_kind(1).is_ident(),
            TokenKind::Keyword(KeywordId::Class | KeywordId::Typedef) => scope == Scope::Module,
            TokenKind::Keyword(id) => keywords::is_modifier(id),
            _ => false,
        }
    }

    /// Parse a declaration (with its metadata and modifiers) in `scope`.
    fn declaration(&mut self, scope: Scope) -> PResult<()> {
        let cp = self.checkpoint();
        let prefix = self.declaration_prefix()?;
        match self.peek_kind() {
            TokenKind::Keyword(KeywordId::Class) if scope == Scope::Module => self.class_declaration(cp),
            TokenKind::Keyword(KeywordId::Typedef) if scope == Scope::Module => self.typedef_declaration(cp),
            TokenKind::Keyword(KeywordId::Var | KeywordId::Final) => self.field_declaration(cp, scope),
            TokenKind::Keyword(KeywordId::Function) => self.method_declaration(cp, scope),
            // Metadata on an expression: `@:privateAccess obj.secret = 1;`
            _ if scope != Scope::ClassBody && prefix.modifiers == 0 && prefix.metadata > 0 => {
                self.start_at(cp, SyntaxKind::ExpressionStatement, None);
                self.field(FieldName::Expression);
                self.expression()?;
                self.terminator()?;
                self.finish();
                Ok(())
            }
            _ => Err(self.expected(match scope {
                Scope::ClassBody => "class member",
                Scope::Module | Scope::Local => "declaration",
            })),
        }
    }

    /// Metadata and modifiers, each attached under its field.
    fn declaration_prefix(&mut self) -> PResult<Prefix> {
        let mut prefix = Prefix::default();
        loop {
            match self.peek_kind() {
                TokenKind::Punctuation(PunctuationId::At) => {
                    self.field(FieldName::Metadata);
                    self.metadata()?;
                    prefix.metadata += 1;
                }
                TokenKind::Keyword(id) if keywords::is_modifier(id) => {
                    self.bump_field(FieldName::Modifier);
                    prefix.modifiers += 1;
                }
                // `final` before another declaration keyword is a modifier; before a name it declares.
                TokenKind::Keyword(KeywordId::Final)
                    if self.nth_kind(1).keyword_id().is_some_and(starts_declaration) =>
                {
                    self.bump_field(FieldName::Modifier);
                    prefix.modifiers += 1;
                }
                _ => return Ok(prefix),
            }
        }
    }

    /// `@name`, `@:name`, optionally followed by an adjacent `(args)`.
    fn metadata(&mut self) -> PResult<()> {
        self.start(SyntaxKind::Metadata);
        self.bump(); // @
        self.match_punct(PunctuationId::Colon);
        self.expect_name(FieldName::Name, "metadata name")?;
        if self.check_punct(PunctuationId::LParen) && self.adjacent_to_previous() {
            self.field(FieldName::Arguments);
            self.arguments()?;
        }
        self.finish();
        Ok(())
    }

    /// Return `true` if the current token directly follows the previous one.
    fn adjacent_to_previous(&self) -> bool {
        self.pos > 0 && self.tokens[self.pos - 1].is_adjacent_to(&self.peek())
    }

    /// `class Name<T> extends Base implements I { ... }`; without a body the declaration ends like a statement.
    fn class_declaration(&mut self, cp: Checkpoint) -> PResult<()> {
        self.start_at(cp, SyntaxKind::ClassDeclaration, None);
        self.bump(); // class
        self.expect_ident(FieldName::Name, "class name")?;
        if self.check_op(OperatorId::Lt) {
            self.field(FieldName::TypeParameters);
            self.type_parameters()?;
        }
        if self.match_keyword(KeywordId::Extends) {
            self.field(FieldName::Superclass);
            self.named_type()?;
        }
        while self.match_keyword(KeywordId::Implements) {
            self.field(FieldName::Interface);
            self.named_type()?;
        }
        if self.check_punct(PunctuationId::LBrace) {
            self.field(FieldName::Body);
            self.class_body()?;
        } else {
            self.terminator()?;
        }
        self.finish();
        Ok(())
    }

    fn class_body(&mut self) -> PResult<()> {
        self.start(SyntaxKind::ClassBody);
        let opener = self.current_span();
        self.expect_punct(PunctuationId::LBrace, "`{`")?;
        self.scan.open(BraceContext::ClassBody, opener);
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            if self.check_punct(PunctuationId::Semicolon) {
                self.token_node(SyntaxKind::EmptyStatement);
            } else {
                self.recover_item(Self::class_member)?;
            }
        }
        self.expect_closing(PunctuationId::RBrace, Some(BraceContext::ClassBody), opener, "`}`")?;
        self.finish();
        Ok(())
    }

    fn class_member(&mut self) -> PResult<()> {
        self.nonterminal(|p| {
            if p.peek_kind().directive_id().is_some() {
                p.preprocessor_directive()
            } else {
                p.declaration(Scope::ClassBody)
            }
        })
    }

    /// `var name(get, set):Type = value;` (also `final`). Locally presented as `variable_declaration`.
    fn field_declaration(&mut self, cp: Checkpoint, scope: Scope) -> PResult<()> {
        self.start_at(cp, SyntaxKind::FieldDeclaration, None);
        if scope == Scope::Local {
            self.alias(SyntaxKind::VariableDeclaration);
        }
        self.bump(); // var | final
        self.expect_ident(FieldName::Name, "variable name")?;
        if self.check_punct(PunctuationId::LParen) {
            self.field(FieldName::Accessors);
            self.property_accessors()?;
        }
        if self.match_punct(PunctuationId::Colon) {
            self.field(FieldName::Type);
            self.type_expr()?;
        }
        if self.check_op(OperatorId::Eq) {
            self.bump();
            self.field(FieldName::Value);
            self.expression()?;
        }
        self.terminator()?;
        self.finish();
        Ok(())
    }

    /// `(get, set)`; accessor names may be keywords (`default`, `null`, `dynamic`).
    fn property_accessors(&mut self) -> PResult<()> {
        self.start(SyntaxKind::PropertyAccessors);
        self.bump(); // (
        self.expect_name(FieldName::Name, "property accessor")?;
        self.expect_punct(PunctuationId::Comma, "`,`")?;
        self.expect_name(FieldName::Name, "property accessor")?;
        self.expect_punct(PunctuationId::RParen, "`)`")?;
        self.finish();
        Ok(())
    }

    /// `function name<T>(params):Ret body`. Locally presented as `local_function`.
    fn method_declaration(&mut self, cp: Checkpoint, scope: Scope) -> PResult<()> {
        self.start_at(cp, SyntaxKind::MethodDeclaration, None);
        if scope == Scope::Local {
            self.alias(SyntaxKind::LocalFunction);
        }
        self.bump(); // function
        if self.check_keyword(KeywordId::New) {
            self.bump_field(FieldName::Name);
        } else {
            self.expect_ident(FieldName::Name, "function name")?;
        }
        if self.check_op(OperatorId::Lt) {
            self.field(FieldName::TypeParameters);
            self.type_parameters()?;
        }
        self.field(FieldName::Parameters);
        self.parameter_list()?;
        if self.match_punct(PunctuationId::Colon) {
            self.field(FieldName::ReturnType);
            self.type_expr()?;
        }
        self.function_body()?;
        self.finish();
        Ok(())
    }

    /// Block, bare `;` (signature only), or a single expression followed by a terminator.
    fn function_body(&mut self) -> PResult<()> {
        if self.check_punct(PunctuationId::LBrace) {
            self.field(FieldName::Body);
            self.block()
        } else if self.match_punct(PunctuationId::Semicolon) {
            Ok(())
        } else {
            self.field(FieldName::Body);
            self.expression()?;
            self.terminator()
        }
    }

    /// `(a, ?b:Int, c = 1)`; shared by methods, function expressions and arrow functions.
    fn parameter_list(&mut self) -> PResult<()> {
        self.start(SyntaxKind::ParameterList);
        let opener = self.current_span();
        self.expect_punct(PunctuationId::LParen, "`(`")?;
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                self.field(FieldName::Parameter);
                self.parameter()?;
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_closing(PunctuationId::RParen, None, opener, "`)`")?;
        self.finish();
        Ok(())
    }

    fn parameter(&mut self) -> PResult<()> {
        self.start(SyntaxKind::Parameter);
        if self.check_punct(PunctuationId::Question) {
            self.bump_field(FieldName::Optional);
        }
        self.expect_ident(FieldName::Name, "parameter name")?;
        if self.match_punct(PunctuationId::Colon) {
            self.field(FieldName::Type);
            self.type_expr()?;
        }
        if self.check_op(OperatorId::Eq) {
            self.bump();
            self.field(FieldName::Default);
            self.expression()?;
        }
        self.finish();
        Ok(())
    }

    /// `typedef Name<T> = Type;` (the `;` is optional).
    fn typedef_declaration(&mut self, cp: Checkpoint) -> PResult<()> {
        self.start_at(cp, SyntaxKind::TypedefDeclaration, None);
        self.bump(); // typedef
        self.expect_ident(FieldName::Name, "type name")?;
        if self.check_op(OperatorId::Lt) {
            self.field(FieldName::TypeParameters);
            self.type_parameters()?;
        }
        if !self.check_op(OperatorId::Eq) {
            return Err(self.expected("`=`"));
        }
        self.bump();
        self.field(FieldName::Type);
        self.type_expr()?;
        self.match_punct(PunctuationId::Semicolon);
        self.finish();
        Ok(())
    }

    /// `<T, U:Constraint>`
    fn type_parameters(&mut self) -> PResult<()> {
        self.start(SyntaxKind::TypeParameters);
        self.bump(); // <
        loop {
            self.start(SyntaxKind::TypeParameter);
            self.expect_ident(FieldName::Name, "type parameter name")?;
            if self.match_punct(PunctuationId::Colon) {
                self.field(FieldName::Constraint);
                self.type_expr()?;
            }
            self.finish();
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        if !self.check_op(OperatorId::Gt) {
            return Err(self.expected("`>`"));
        }
        self.bump();
        self.finish();
        Ok(())
    }

    // ========================================================================
    // Preprocessor
    // ========================================================================

    /// `#if cond`, `#elseif cond`, `#else`, `#end`; valid wherever a statement, member or top-level item is.
    fn preprocessor_directive(&mut self) -> PResult<()> {
        let Some(id) = self.peek_kind().directive_id() else {
            return Err(self.expected("preprocessor directive"));
        };
        self.start(SyntaxKind::PreprocessorDirective);
        self.bump();
        if directives::takes_condition(id) {
            self.field(FieldName::Condition);
            self.directive_condition()?;
        }
        self.finish();
        Ok(())
    }

    /// `!cond`, `(expr)` or a dotted name. Names may be keywords (`#if macro`).
    fn directive_condition(&mut self) -> PResult<()> {
        self.nonterminal(|p| {
            if p.check_op(OperatorId::Not) {
                p.start(SyntaxKind::UnaryExpression);
                p.bump_field(FieldName::Operator);
                p.field(FieldName::Operand);
                p.directive_condition()?;
                p.finish();
            } else if p.check_punct(PunctuationId::LParen) {
                p.start(SyntaxKind::ParenthesizedExpression);
                let opener = p.current_span();
                p.bump();
                p.field(FieldName::Expression);
                p.directive_expression(0)?;
                p.expect_closing(PunctuationId::RParen, None, opener, "`)`")?;
                p.finish();
            } else if p.check_name() {
                let cp = p.checkpoint();
                p.token_node(SyntaxKind::Identifier);
                while p.check_punct(PunctuationId::Dot) && is_name(p.nth_kind(1)) {
                    p.start_at(cp, SyntaxKind::MemberExpression, Some(FieldName::Object));
                    p.bump();
                    p.bump_field(FieldName::Property);
                    p.finish();
                }
            } else if matches!(p.peek_kind(), TokenKind::Int | TokenKind::Float) {
                let kind = if p.peek_kind() == TokenKind::Int {
                    SyntaxKind::IntegerLiteral
                } else {
                    SyntaxKind::FloatLiteral
                };
                p.token_node(kind);
            } else if p.peek_kind() == TokenKind::StringStart {
                p.string_literal()?;
            } else {
                return Err(p.expected("condition"));
            }
            Ok(())
        })
    }

    /// Operators inside a parenthesized condition: `(js && !flash)`, `(haxe_ver >= 4.0)`.
    ///
    /// Like [`Parser::binary_expression`], chains at one precedence level extend iteratively and only the right
    /// operand recurses, through the depth budget.
    fn directive_expression(&mut self, min_prec: u8) -> PResult<()> {
        let cp = self.checkpoint();
        self.directive_condition()?;
        while let Some((op, raw)) = self.peek_binary_operator() {
            let Some((prec, assoc)) = operators::binary_info(op) else { break };
            if prec < min_prec || operators::is_assignment(op) {
                break;
            }
            self.start_at(cp, SyntaxKind::BinaryExpression, Some(FieldName::Left));
            self.field(FieldName::Operator);
            self.bump_as(TokenKind::Operator(op), raw);
            self.field(FieldName::Right);
            let next_min = if assoc == Associativity::Right { prec } else { prec + 1 };
            self.nonterminal(|p| p.directive_expression(next_min))?;
            self.finish();
        }
        Ok(())
    }
}

/// Keywords that may follow a modifier-position `final`.
fn starts_declaration(id: KeywordId) -> bool {
    matches!(
        id,
        KeywordId::Class | KeywordId::Function | KeywordId::Var | KeywordId::Final
    ) || keywords::is_modifier(id)
}
