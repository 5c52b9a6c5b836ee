// src/common/csv.rs

use anyhow::Context;

// Monta um CSV a partir de linhas de larguras variadas (os relatórios têm
// um bloco de metadados antes do cabeçalho tabular). O escaping de vírgula,
// aspas e quebra de linha fica por conta do crate.
pub fn to_csv(rows: Vec<Vec<String>>) -> anyhow::Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    for row in rows {
        writer
            .write_record(&row)
            .context("Falha ao escrever linha do CSV")?;
    }

    let bytes = writer
        .into_inner()
        .context("Falha ao finalizar o CSV")?;
    String::from_utf8(bytes).context("CSV com bytes inválidos")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn plain_rows() {
        let csv = to_csv(vec![row(&["a", "b"]), row(&["1", "2"])]).unwrap();
        assert_eq!(csv, "a,b\n1,2\n");
    }

    #[test]
    fn quoting_is_delegated_to_the_crate() {
        let csv = to_csv(vec![row(&["com, vírgula", "com \"aspas\"", "multi\nlinha"])]).unwrap();
        assert_eq!(
            csv,
            "\"com, vírgula\",\"com \"\"aspas\"\"\",\"multi\nlinha\"\n"
        );
    }

    #[test]
    fn variable_widths_and_blank_separator() {
        let csv = to_csv(vec![
            row(&["Tutor Report"]),
            row(&["Total Visits", "3"]),
            Vec::new(),
            row(&["Visit #", "Check-In Time"]),
        ])
        .unwrap();
        assert_eq!(
            csv,
            "Tutor Report\nTotal Visits,3\n\nVisit #,Check-In Time\n"
        );
    }
}
