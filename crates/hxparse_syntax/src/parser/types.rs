/// Type parsing methods.
///
/// This chunk implements type annotations:
/// - Named types with package paths and type arguments (`haxe.ds.Map<String, Int>`)
/// - Function types, both curried (`Int -> String -> Void`) and parenthesized (`(name:String, Int) -> Void`)
/// - Structural types (`{ x:Int, ?y:Float }`), optional types (`?Int`), parenthesized types
///
/// ## Notes
/// - Type arguments close on single `>` tokens. The lexer never combines `>`, so `Array<Array<Int>>` needs no
///   splitting here.
/// - `->` is right-associative: `A -> B -> C` is `A -> (B -> C)`.
impl<'a> Parser<'a> {
    fn type_expr(&mut self) -> PResult<()> {
        self.nonterminal(Self::type_inner)
    }

    fn type_inner(&mut self) -> PResult<()> {
        let cp = self.checkpoint();
        if self.check_punct(PunctuationId::LParen) && self.group_followed_by_arrow() {
            return self.function_type_with_arguments();
        }
        self.type_atom()?;
        if self.check_punct(PunctuationId::Arrow) {
            self.start_at(cp, SyntaxKind::FunctionType, Some(FieldName::Parameter));
            self.bump();
            self.field(FieldName::ReturnType);
            self.type_expr()?;
            self.finish();
        }
        Ok(())
    }

    /// `(a:Int, ?b:String, Bool) -> Void`
    fn function_type_with_arguments(&mut self) -> PResult<()> {
        self.start(SyntaxKind::FunctionType);
        self.bump(); // (
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                self.field(FieldName::Parameter);
                self.function_type_argument()?;
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen, "`)`")?;
        self.expect_punct(PunctuationId::Arrow, "`->`")?;
        self.field(FieldName::ReturnType);
        self.type_expr()?;
        self.finish();
        Ok(())
    }

    /// A function type argument: a bare type, or `name:Type` / `?name:Type`.
    fn function_type_argument(&mut self) -> PResult<()> {
        let offset = usize::from(self.check_punct(PunctuationId::Question));
        let named =
            self.nth_kind(offset).is_ident() && self.nth_kind(offset + 1).is_punctuation(PunctuationId::Colon);
        if !named {
            return self.type_expr();
        }
        self.start(SyntaxKind::Parameter);
        if offset == 1 {
            self.bump_field(FieldName::Optional);
        }
        self.bump_field(FieldName::Name);
        self.bump(); // :
        self.field(FieldName::Type);
        self.type_expr()?;
        self.finish();
        Ok(())
    }

    fn type_atom(&mut self) -> PResult<()> {
        match self.peek_kind() {
            TokenKind::Punctuation(PunctuationId::LBrace) => self.structural_type(),
            TokenKind::Punctuation(PunctuationId::Question) => {
                self.start(SyntaxKind::OptionalType);
                self.bump();
                self.field(FieldName::Type);
                self.nonterminal(Self::type_atom)?;
                self.finish();
                Ok(())
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.start(SyntaxKind::ParenthesizedType);
                let opener = self.current_span();
                self.bump();
                self.field(FieldName::Type);
                self.type_expr()?;
                self.expect_closing(PunctuationId::RParen, None, opener, "`)`")?;
                self.finish();
                Ok(())
            }
            kind if is_name(kind) => self.named_type(),
            _ => Err(self.expected("type")),
        }
    }

    /// `pack.sub.Name<Args>`: path segments may be keywords, the final name may not.
    fn named_type(&mut self) -> PResult<()> {
        self.start(SyntaxKind::NamedType);
        loop {
            if !self.check_name() {
                return Err(self.expected("type name"));
            }
            let more = self.nth_kind(1).is_punctuation(PunctuationId::Dot) && is_name(self.nth_kind(2));
            if !more {
                self.expect_ident(FieldName::Name, "type name")?;
                break;
            }
            self.bump_field(FieldName::Path);
            self.bump(); // .
        }
        if self.check_op(OperatorId::Lt) {
            self.field(FieldName::TypeArguments);
            self.type_arguments()?;
        }
        self.finish();
        Ok(())
    }

    fn type_arguments(&mut self) -> PResult<()> {
        self.start(SyntaxKind::TypeArguments);
        self.bump(); // <
        loop {
            self.type_expr()?;
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

    /// `{ x:Int, ?y:Float }` or `{ var x:Int; final y:Float; }`.
    ///
    /// Members are presented as `pair`; the production stays `structure_type_member`.
    fn structural_type(&mut self) -> PResult<()> {
        self.start(SyntaxKind::StructuralType);
        let opener = self.current_span();
        self.bump();
        self.scan.open(BraceContext::StructuralType, opener);
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            self.start(SyntaxKind::StructuralTypeMember);
            self.alias(SyntaxKind::Pair);
            if self.check_keyword(KeywordId::Var) || self.check_keyword(KeywordId::Final) {
                self.bump();
            }
            if self.check_punct(PunctuationId::Question) {
                self.bump_field(FieldName::Optional);
            }
            self.expect_ident(FieldName::Name, "field name")?;
            self.expect_punct(PunctuationId::Colon, "`:`")?;
            self.field(FieldName::Type);
            self.type_expr()?;
            self.finish();
            if !(self.match_punct(PunctuationId::Comma) || self.match_punct(PunctuationId::Semicolon)) {
                break;
            }
        }
        self.expect_closing(PunctuationId::RBrace, Some(BraceContext::StructuralType), opener, "`}`")?;
        self.finish();
        Ok(())
    }
}
