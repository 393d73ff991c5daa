use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::model::join_values;
use crate::{NO_FINDINGS, RenderableReport};

pub(crate) const SHEET_NAME: &str = "Findings";

const HEADER: [&str; 8] = [
    "PolicyName",
    "PolicyArn",
    "StatementIndex",
    "RuleId",
    "Action",
    "Resource",
    "Risk",
    "Reason",
];

/// Single-sheet workbook with the same columns as the CSV sink. Statement indices are
/// numeric cells; every other column is text.
pub fn render_xlsx(report: &RenderableReport) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let bold = Format::new().set_bold();
    for (col, title) in (0u16..).zip(HEADER) {
        sheet.write_string_with_format(0, col, title, &bold)?;
    }
    sheet.set_freeze_panes(1, 0)?;

    if !report.has_findings() {
        write_text_row(sheet, 1, &["None", "None", "", "", "", "", "None", NO_FINDINGS])?;
        return workbook.save_to_buffer();
    }

    let mut row = 1u32;
    for policy in &report.policies {
        for f in &policy.findings {
            let actions = join_values(&f.actions);
            let resources = join_values(&f.resources);
            write_text_row(
                sheet,
                row,
                &[
                    policy.name.as_str(),
                    policy.arn.as_str(),
                    "",
                    f.rule_id.as_str(),
                    actions.as_str(),
                    resources.as_str(),
                    f.risk.label(),
                    f.reason.as_str(),
                ],
            )?;
            sheet.write_number(row, 2, f.statement_index as f64)?;
            row += 1;
        }
    }

    workbook.save_to_buffer()
}

/// Empty values are left as blank cells rather than zero-length strings.
fn write_text_row(sheet: &mut Worksheet, row: u32, fields: &[&str]) -> Result<(), XlsxError> {
    for (col, value) in (0u16..).zip(fields) {
        if !value.is_empty() {
            sheet.write_string(row, col, *value)?;
        }
    }
    Ok(())
}
