use super::*;
use crate::algebra::*;
use crate::solver::core::traits::InfoPrint;
use std::io::stdout;
use std::io::Write;
use std::time::Duration;

// exponential formatting with a normalized two-digit, always-signed
// exponent, so that progress columns stay aligned
macro_rules! expformat {
    ($fmt:expr,$val:expr) => {
        if $val.is_finite() {
            _pad_exponent(format!($fmt, $val))
        } else {
            format!($fmt, $val)
        }
    };
}

impl<T> InfoPrint<T> for DefaultInfo<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type SE = DefaultSettings<T>;

    fn print_configuration(
        &self,
        settings: &DefaultSettings<T>,
        data: &DefaultProblemData<T>,
    ) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        let mut out = stdout();

        writeln!(out, "\nproblem:")?;
        writeln!(out, "  variables     = {}", data.n)?;
        writeln!(out, "  eq rows       = {}", data.p)?;
        writeln!(out, "  ineq rows     = {}", data.m)?;
        writeln!(
            out,
            "  finite bounds = {} lower, {} upper",
            data.n_lb(),
            data.n_ub()
        )?;
        writeln!(out, "  nnz(P)        = {}", data.P.nnz())?;
        writeln!(out, "  nnz(A)        = {}", data.A.nnz())?;
        writeln!(out, "  nnz(G)        = {}", data.G.nnz())?;

        writeln!(out)?;
        _print_settings(settings)?;
        writeln!(out)?;

        Ok(())
    }

    fn print_status_header(&self, settings: &DefaultSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        let mut out = stdout();

        let headers = [
            "iter    ", "pobj         ", "dobj        ", "gap       ", "pres      ",
            "dres      ", " μ        ", " ρ        ", " δ        ", "step      ",
        ];
        for h in headers {
            write!(out, "{}", h)?;
        }
        writeln!(out)?;
        writeln!(out, "{}", "-".repeat(99))?;
        out.flush()?;
        Ok(())
    }

    fn print_status(&self, settings: &DefaultSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        let mut out = stdout();

        write!(out, "{:>3}  ", self.iterations)?;
        write!(out, "{}  ", expformat!("{:+8.4e}", self.cost_primal))?;
        write!(out, "{}  ", expformat!("{:+8.4e}", self.cost_dual))?;
        let gapprint = T::min(self.gap_abs, self.gap_rel);
        write!(out, "{}  ", expformat!("{:6.2e}", gapprint))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.res_primal))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.res_dual))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.mu))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.rho))?;
        write!(out, "{}  ", expformat!("{:6.2e}", self.delta))?;

        if self.iterations > 0 {
            write!(out, "{}  ", expformat!("{:>.2e}", self.step_length))?;
        } else {
            write!(out, " ------   ")?;
        }

        writeln!(out)?;

        Ok(())
    }

    fn print_footer(&self, settings: &DefaultSettings<T>) -> std::io::Result<()> {
        if !settings.verbose {
            return Ok(());
        }

        let mut out = stdout();

        writeln!(out, "{}", "-".repeat(99))?;
        writeln!(out, "Terminated with status = {}", self.status)?;
        let elapsed = Duration::from_secs_f64(self.solve_time);
        writeln!(out, "solve time = {:?}", elapsed)?;

        Ok(())
    }
}

fn _bool_on_off(v: bool) -> &'static str {
    match v {
        true => "on",
        false => "off",
    }
}

fn _print_settings<T: FloatT>(settings: &DefaultSettings<T>) -> std::io::Result<()> {
    let set = settings;
    let mut out = stdout();

    writeln!(out, "settings:")?;

    writeln!(
        out,
        "  kkt solver = {:?}, precision: {} bit",
        set.kkt_solver,
        _get_precision_string::<T>()
    )?;

    writeln!(
        out,
        "  max iter = {}, max step = {:.3}",
        set.max_iter, set.max_step_fraction
    )?;

    writeln!(
        out,
        "  tol_feas = {:.1e}/{:.1e}, tol_gap = {:.1e}/{:.1e} (abs/rel)",
        set.eps_abs, set.eps_rel, set.eps_duality_gap_abs, set.eps_duality_gap_rel
    )?;

    writeln!(
        out,
        "  prox reg: ρ0 = {:.1e}, δ0 = {:.1e}, floor = {:.1e}, reduction ratio = {:.2}",
        set.rho_init, set.delta_init, set.reg_lower_limit, set.reduction_ratio
    )?;

    writeln!(
        out,
        "  dynamic reg: ϵ = {:.1e}, δ = {:.1e}, max retries = {}",
        set.reg_finetune_lower_limit, set.reg_finetune_delta, set.reg_finetune_max_iter
    )?;

    writeln!(
        out,
        "  iter refine: {}, abstol = {:.1e}, reltol = {:.1e},",
        _bool_on_off(set.iterative_refinement_enable),
        set.iterative_refinement_abs_tol,
        set.iterative_refinement_rel_tol
    )?;

    writeln!(
        out,
        "               max iter = {}, min improvement = {:.1}",
        set.iterative_refinement_max_iter, set.iterative_refinement_min_improvement_rate
    )?;

    writeln!(
        out,
        "  equilibrate: {}, min_scale = {:.1e}, max_scale = {:.1e}, max iter = {}",
        _bool_on_off(set.equilibrate_enable),
        set.equilibrate_min_scaling,
        set.equilibrate_max_scaling,
        set.equilibrate_max_iter,
    )?;

    Ok(())
}

fn _get_precision_string<T: FloatT>() -> String {
    (::std::mem::size_of::<T>() * 8).to_string()
}

// Rewrite a `LowerExp`-formatted string so that the exponent always has
// an explicit sign and at least two digits, e.g. "1.5e7" -> "1.5e+07".
fn _pad_exponent(mut s: String) -> String {
    // a finite LowerExp value always contains 'e'
    let eidx = s.find('e').unwrap();
    let negative = s.as_bytes()[eidx + 1] == b'-';

    let digits = s.len() - eidx - 1 - usize::from(negative);
    let insert_at = eidx + 1 + usize::from(negative);

    match (negative, digits < 2) {
        (false, false) => s.insert(insert_at, '+'),
        (false, true) => s.insert_str(insert_at, "+0"),
        (true, true) => s.insert(insert_at, '0'),
        (true, false) => (),
    }
    s
}
