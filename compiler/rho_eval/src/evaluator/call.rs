//! Function calls: argument collection, `...` expansion and closure
//! application.

use std::sync::Arc;

use rho_ir::{Expr, ExprKind, Formal, FunctionLit, Name, StmtKind};
use rho_value::{ellipsis_context, missing_body, not_a_function, EvalError, EvalResult, Value};
use smallvec::SmallVec;

use super::{Evaluator, WellKnownNames};
use crate::binder::{match_arguments, FormalSlot};

/// Call name used for closures invoked through an expression callee.
const ANONYMOUS: &str = "<anonymous>";

/// One actual argument after call-side `...` expansion.
pub(crate) struct Actual<'a> {
    pub(crate) tag: Option<Name>,
    pub(crate) source: ArgSource<'a>,
}

/// Where an actual's value comes from.
pub(crate) enum ArgSource<'a> {
    /// Still to be evaluated in the caller's frame.
    Expr(&'a Expr),
    /// Already evaluated; forwarded through `...`.
    Value(Value),
}

impl Evaluator {
    /// Dispatch a call.
    ///
    /// A plain name resolves `c` first, then closures along the frame
    /// chain (non-function bindings are skipped), then builtins.
    pub(crate) fn eval_call(&mut self, callee: &Expr, args: &[Expr]) -> EvalResult {
        let name = match callee.kind {
            ExprKind::Ident(name) | ExprKind::Str(name) => Some(name),
            _ => None,
        };
        if let Some(name) = name {
            if name == self.names.c {
                let result = self.builtin_c(args);
                self.control.invisible = false;
                return result;
            }
            if let Some(func) = self.env.lookup_function(name) {
                let label = self.interner.lookup(name);
                return self.apply_closure(&func, args, label);
            }
            return self.call_builtin(name, args);
        }
        match self.eval_expr(callee)? {
            Value::Closure(func) => self.apply_closure(&func, args, ANONYMOUS),
            _ => Err(not_a_function()),
        }
    }

    /// Collect actuals in call order, splicing in the values bound to the
    /// enclosing `...` wherever the call mentions `...`.
    pub(crate) fn collect_actuals<'a>(
        &self,
        args: &'a [Expr],
    ) -> Result<Vec<Actual<'a>>, EvalError> {
        let mut actuals = Vec::with_capacity(args.len());
        for arg in args {
            match &arg.kind {
                ExprKind::Ellipsis => {
                    actuals.extend(self.expand_dots()?.into_iter().map(|(tag, value)| Actual {
                        tag,
                        source: ArgSource::Value(value),
                    }));
                }
                ExprKind::Tagged { tag, value } => actuals.push(Actual {
                    tag: Some(*tag),
                    source: ArgSource::Expr(value),
                }),
                _ => actuals.push(Actual {
                    tag: None,
                    source: ArgSource::Expr(arg),
                }),
            }
        }
        Ok(actuals)
    }

    /// Tagged values held by the nearest variadic frame.
    pub(crate) fn expand_dots(&self) -> Result<Vec<(Option<Name>, Value)>, EvalError> {
        let frame = self.env.dots_frame().ok_or_else(ellipsis_context)?;
        let frame = frame.borrow();
        let tags = frame.dots().unwrap_or_default();
        let mut values = Vec::with_capacity(tags.len());
        for (i, tag) in tags.iter().enumerate() {
            let slot = WellKnownNames::dot(&self.interner, i + 1);
            if let Some(value) = frame.get_local(slot) {
                values.push((*tag, value.clone()));
            }
        }
        Ok(values)
    }

    /// Number of actuals a call passes, counting `...` expansion, without
    /// evaluating anything.
    pub(crate) fn count_actuals(&self, args: &[Expr]) -> Result<usize, EvalError> {
        let mut count = 0;
        for arg in args {
            count += match arg.kind {
                ExprKind::Ellipsis => self.expand_dots()?.len(),
                _ => 1,
            };
        }
        Ok(count)
    }

    /// Evaluate a collected actual in the current frame.
    pub(crate) fn force(&mut self, source: ArgSource<'_>) -> EvalResult {
        match source {
            ArgSource::Expr(expr) => self.eval_expr(expr),
            ArgSource::Value(value) => Ok(value),
        }
    }

    /// Collect and evaluate every actual, keeping tags.
    pub(crate) fn eval_actuals(
        &mut self,
        args: &[Expr],
    ) -> Result<Vec<(Option<Name>, Value)>, EvalError> {
        let actuals = self.collect_actuals(args)?;
        let mut values = Vec::with_capacity(actuals.len());
        for actual in actuals {
            values.push((actual.tag, self.force(actual.source)?));
        }
        Ok(values)
    }

    /// Call a closure.
    ///
    /// Actuals are matched to formals and evaluated in the caller's frame;
    /// the body then runs in a fresh child of the caller's frame, where
    /// defaults of unmatched formals are evaluated too.
    #[tracing::instrument(level = "debug", skip(self, func, args))]
    pub(crate) fn apply_closure(
        &mut self,
        func: &Arc<FunctionLit>,
        args: &[Expr],
        label: &str,
    ) -> EvalResult {
        let actuals = self.collect_actuals(args)?;
        let matched = {
            let tags: SmallVec<[Option<&str>; 8]> = actuals
                .iter()
                .map(|a| a.tag.map(|t| self.interner.lookup(t)))
                .collect();
            let slots: SmallVec<[FormalSlot<'_>; 8]> = func
                .formals
                .iter()
                .map(|formal| match formal {
                    Formal::Param { name, default } => FormalSlot::Param {
                        name: self.interner.lookup(*name),
                        has_default: default.is_some(),
                    },
                    Formal::Ellipsis => FormalSlot::Ellipsis,
                })
                .collect();
            match_arguments(&slots, &tags).map_err(|e| e.with_call(label))?
        };
        tracing::debug!(bound = ?matched.bound, dots = matched.dots.len(), "arguments matched");

        let tags: Vec<Option<Name>> = actuals.iter().map(|a| a.tag).collect();
        let mut sources: Vec<Option<ArgSource<'_>>> =
            actuals.into_iter().map(|a| Some(a.source)).collect();
        let mut take = |i: usize| sources.get_mut(i).and_then(Option::take);

        let mut bound = Vec::with_capacity(matched.bound.len());
        for binding in &matched.bound {
            let value = match binding.and_then(&mut take) {
                Some(source) => Some(self.force(source)?),
                None => None,
            };
            bound.push(value);
        }
        let mut dots = Vec::with_capacity(matched.dots.len());
        for &i in &matched.dots {
            if let Some(source) = take(i) {
                dots.push((tags[i], self.force(source)?));
            }
        }

        let dot_names: Vec<Name> = (1..=dots.len())
            .map(|n| WellKnownNames::dot(&self.interner, n))
            .collect();

        let mut scoped = self.enter_frame();
        {
            let mut frame = scoped.env.top().borrow_mut();
            for (formal, value) in func.formals.iter().zip(bound.iter_mut()) {
                if let (Some(name), Some(value)) = (formal.name(), value.take()) {
                    frame.define(name, value);
                }
            }
            if func.has_ellipsis() {
                let dot_tags = dots.iter().map(|(tag, _)| *tag).collect();
                for (slot, (_, value)) in dot_names.into_iter().zip(dots) {
                    frame.define(slot, value);
                }
                frame.set_dots(dot_tags);
            }
        }

        for (formal, binding) in func.formals.iter().zip(&matched.bound) {
            if let (
                Formal::Param {
                    name,
                    default: Some(default),
                },
                None,
            ) = (formal, binding)
            {
                let value = scoped.eval_expr(default).map_err(|e| e.with_call(label))?;
                scoped.env.define(*name, value);
            }
        }

        if matches!(func.body.kind, StmtKind::Empty) {
            return Err(missing_body().with_call(label));
        }
        scoped.eval_stmt(&func.body).map_err(|e| e.with_call(label))
    }
}
