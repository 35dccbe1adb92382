// Alias resolution: arbitrary input headers -> canonical rows
use shared::brazilian_format::{parse_number, to_date_or_null};
use shared::{CanonicalRow, RawRecord, RawValue};

/// Canonical columns, each with the historical header spellings it absorbs.
/// The canonical name always comes first so an already-canonical record
/// normalizes to itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Account,
    CompanyName,
    TaxId,
    IssuedCount,
    IssuedValue,
    SettledCount,
    SettledValue,
    ReferenceDate,
}

impl CanonicalField {
    /// Columns every import must carry, in export order.
    pub const REQUIRED: [CanonicalField; 7] = [
        CanonicalField::Account,
        CanonicalField::CompanyName,
        CanonicalField::TaxId,
        CanonicalField::IssuedCount,
        CanonicalField::IssuedValue,
        CanonicalField::SettledCount,
        CanonicalField::SettledValue,
    ];

    pub const NUMERIC: [CanonicalField; 4] = [
        CanonicalField::IssuedCount,
        CanonicalField::IssuedValue,
        CanonicalField::SettledCount,
        CanonicalField::SettledValue,
    ];

    pub fn column_name(self) -> &'static str {
        self.aliases()[0]
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CanonicalField::Account => &["account", "Conta"],
            CanonicalField::CompanyName => &["companyName", "NomeEmpresa", "Nome da Empresa"],
            CanonicalField::TaxId => &["taxId", "CNPJ"],
            CanonicalField::IssuedCount => &["issuedCount", "QtdEmitidos", "Quant. de Boletos Emitidos"],
            CanonicalField::IssuedValue => &["issuedValue", "ValorEmitidos", "Valor Boletos Emitidos"],
            CanonicalField::SettledCount => &["settledCount", "QtdLiquidados", "Quant. Boletos Liquidados"],
            CanonicalField::SettledValue => &["settledValue", "ValorLiquidados", "Valor Boletos Liq."],
            CanonicalField::ReferenceDate => {
                &["referenceDate", "Data", "DataRef", "Data Emissão", "Competencia", "Mês", "Mes"]
            }
        }
    }

    /// First alias present with a non-missing value.
    pub fn resolve(self, record: &RawRecord) -> Option<&RawValue> {
        self.aliases()
            .iter()
            .filter_map(|alias| record.get(alias))
            .find(|value| !value.is_missing())
    }
}

pub fn normalize_row(record: &RawRecord) -> CanonicalRow {
    let text = |field: CanonicalField| field.resolve(record).map(RawValue::to_text).unwrap_or_default();
    let number = |field: CanonicalField| field.resolve(record).map(parse_number).unwrap_or(0.0);

    // Every date alias is probed until one of them actually parses.
    let reference_date = CanonicalField::ReferenceDate
        .aliases()
        .iter()
        .filter_map(|alias| record.get(alias))
        .filter(|value| !value.is_missing())
        .find_map(to_date_or_null);

    CanonicalRow {
        account: text(CanonicalField::Account),
        company_name: text(CanonicalField::CompanyName),
        tax_id: text(CanonicalField::TaxId),
        issued_count: number(CanonicalField::IssuedCount),
        issued_value: number(CanonicalField::IssuedValue),
        settled_count: number(CanonicalField::SettledCount),
        settled_value: number(CanonicalField::SettledValue),
        reference_date,
    }
}

/// Normalized rows that passed the account/company gate, each kept next to
/// the raw record it came from.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub rows: Vec<CanonicalRow>,
    pub raw: Vec<RawRecord>,
    pub dropped: usize,
}

pub fn normalize_records(records: Vec<RawRecord>) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();
    for record in records {
        let row = normalize_row(&record);
        if row.is_identified() {
            batch.rows.push(row);
            batch.raw.push(record);
        } else {
            batch.dropped += 1;
        }
    }
    if batch.dropped > 0 {
        tracing::debug!(dropped = batch.dropped, kept = batch.rows.len(), "Dropped rows without account or company name");
    }
    batch
}
