//! The bank statement table shipped with the crate.
//!
//! Rows are kept exactly as exported by the bank, including the repeated
//! "Nomina" row and the mis-encoded "INVERSIÃ“N" text. Do not tidy them here;
//! use a normalization mode or a custom table file instead.

use std::sync::OnceLock;

use subtype_core::{CategoryResolver, InvalidTableError, Normalize, ResolverOptions};

pub const BANK_TABLE: &[(&str, &str)] = &[
    ("COMPENSACION POR RETRASO", "Compensation Credit"),
    ("RETIRO CAJERO AUTOMATICO", "Cash Withdrawal"),
    ("GRACIAS POR SU PAGO CON CARGO A BBVA", "Credit Card Payment"),
    ("AMERICAN EXPRESS    01234", "Credit Card Payment"),
    ("PAGO TARJETA DE CREDITO", "Credit Card Payment"),
    ("(BE) Pago servicio: TARJETA DE CREDITO B", "Credit Card Payment"),
    ("Pago servicio: TARJETA DE CREDITO", "Credit Card Payment"),
    ("SPEI ENVIADO NAFIN", "Investment"),
    ("SPEI ENVIADO GBM", "Investment"),
    ("Apertura de INVERSIÃ“N HEY", "Investment"),
    ("YOUR NAME. HeyAhorra", "Investment"),
    ("Recepcion de cuenta", "Investment"),
    ("Gastos Medicos", "Medical Reimbursement"),
    ("Nomina", "Payroll"),
    ("Pagodenomina", "Payroll"),
    ("Nomina", "Payroll"),
    ("SPEI RECIBIDO", "3rd Party Transfer"),
    ("PAGO CUENTA DE TERCERO", "3rd Party Transfer"),
    ("SPEI RECIBIDOBANORTE", "3rd Party Transfer"),
    ("SPEI DEVUELTOSTP", "Canceled Transfer"),
    ("SPEI DEVUELTONAFIN", "Canceled Transfer"),
    ("Reembolso Viaticos", "Work Expenses Reimbursement"),
    ("MONTO A DIFERIR MESES EN AUTOMATICO", "Deferred Payment"),
    ("MESES EN AUTOMATICO NACIONAL", "Monthly Payment"),
    ("SPEI.BBVA MEXICO.012345.YOUR NAME", "Intra account transfers"),
];

/// Build a fresh resolver over [`BANK_TABLE`].
pub fn bank_resolver(normalize: Normalize) -> Result<CategoryResolver, InvalidTableError> {
    CategoryResolver::load_with(
        BANK_TABLE.iter().copied(),
        ResolverOptions::default().with_normalize(normalize),
    )
}

static SHARED: OnceLock<CategoryResolver> = OnceLock::new();

/// Process-wide resolver over [`BANK_TABLE`] with literal matching.
///
/// Built on first use and never mutated afterwards.
pub fn shared() -> Result<&'static CategoryResolver, InvalidTableError> {
    if let Some(resolver) = SHARED.get() {
        return Ok(resolver);
    }
    let resolver = bank_resolver(Normalize::None)?;
    Ok(SHARED.get_or_init(|| resolver))
}
