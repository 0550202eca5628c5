//! Assembly of the prevention duty report.
//!
//! The report is derived, never stored: commander info, event metadata and
//! the ordered assignment list go in, PDF bytes come out. Layout happens in
//! two stages so the total page count can land in the footers: `pages`
//! builds the intermediate sheet representation, `render` serializes it.
//!
//! The assembler does not validate its inputs. Unset commander fields
//! render as empty strings, an empty assignment list renders a table with
//! no body rows, and a missing logo image is silently left out.

mod error;
mod pdf;
mod sheet;

pub use error::ReportError;
pub use sheet::{Align, FontStyle, Op, PageSheet};

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::models::{AssignedPerson, CommanderInfo, EventMetadata};
use crate::utils::format::{long_date, truncate};
use sheet::SheetBuilder;

/// Centered organization lines repeated in every page header.
const ORGANIZATION_LINES: [&str; 3] = [
    "CORPO DE BOMBEIROS MILITAR DO PARÁ",
    "COORDENADORIA ESTADUAL DE DEFESA CIVIL",
    "COMANDO OPERACIONAL",
];

const TITLE: &str = "RELATÓRIO DE PREVENÇÃO – JORNADA EXTRAORDINÁRIA";
const SECTION_INITIAL_DATA: &str = "1. DADOS INICIAIS";
const SECTION_PERSONNEL: &str = "2. EFETIVO EMPREGADO";

/// Maximum characters of a full name in the personnel table; longer names
/// are cut silently for column fit.
pub const NAME_MAX_CHARS: usize = 45;

/// Column widths of the personnel table, in millimetres.
const COL_SEQUENCE: f32 = 10.0;
const COL_RANK: f32 = 25.0;
const COL_NAME: f32 = 85.0;
const COL_UNIT: f32 = 30.0;
const COL_IDENTIFIER: f32 = 25.0;

/// Height of every bordered cell.
const CELL_HEIGHT: f32 = 6.0;

const FILL_GREY: (u8, u8, u8) = (230, 230, 230);

const SIGNATURE_CITY: &str = "Belém-PA";
const SIGNATURE_RULE: &str = "__________________________________________________";
const COMMANDER_SUFFIX: &str = "Comandante da Prevenção";

/// Default logo filename checked at render time.
pub const DEFAULT_LOGO_NAME: &str = "brasao.png";

/// Default download filename for the finished document.
pub const DEFAULT_OUTPUT_NAME: &str = "Relatorio.pdf";

/// A single duty report, borrowing the data it renders.
pub struct DutyReport<'a> {
    commander: Option<&'a CommanderInfo>,
    event: &'a EventMetadata,
    personnel: &'a [AssignedPerson],
    logo_path: PathBuf,
    signed_on: NaiveDate,
}

impl<'a> DutyReport<'a> {
    /// The signature line uses the generation date, not the event date.
    pub fn new(
        commander: Option<&'a CommanderInfo>,
        event: &'a EventMetadata,
        personnel: &'a [AssignedPerson],
    ) -> Self {
        Self {
            commander,
            event,
            personnel,
            logo_path: PathBuf::from(DEFAULT_LOGO_NAME),
            signed_on: Local::now().date_naive(),
        }
    }

    pub fn with_logo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo_path = path.into();
        self
    }

    /// Pin the signature date; used for reproducible output.
    pub fn signed_on(mut self, date: NaiveDate) -> Self {
        self.signed_on = date;
        self
    }

    /// Serialize the report into PDF bytes.
    pub fn render(&self) -> Result<Vec<u8>, ReportError> {
        let logo = self.logo_path.exists().then_some(self.logo_path.as_path());
        pdf::render(&self.pages(), logo)
    }

    /// Render and write to `path`.
    pub fn render_to_file(&self, path: &Path) -> Result<(), ReportError> {
        std::fs::write(path, self.render()?)?;
        Ok(())
    }

    /// Lay the report out into page sheets. Footers are resolved here once
    /// the total page count is known.
    pub fn pages(&self) -> Vec<PageSheet> {
        let header = ORGANIZATION_LINES.map(str::to_string).to_vec();
        let mut sheet = SheetBuilder::new(header, self.logo_path.exists());
        sheet.add_page();

        sheet.set_font(FontStyle::Bold, 14.0);
        sheet.cell(0.0, 10.0, TITLE, false, true, Align::Center, false);
        sheet.ln(5.0);

        self.initial_data_block(&mut sheet);
        self.personnel_table(&mut sheet);
        self.signature_block(&mut sheet);

        sheet.finish(|page, total| format!("Página {}/{}", page, total))
    }

    fn initial_data_block(&self, sheet: &mut SheetBuilder) {
        sheet.set_font(FontStyle::Bold, 10.0);
        sheet.set_fill_color(FILL_GREY.0, FILL_GREY.1, FILL_GREY.2);
        sheet.cell(0.0, CELL_HEIGHT, SECTION_INITIAL_DATA, true, true, Align::Left, true);

        let commander_line = format!("{} {}", self.commander_rank(), self.commander_name());
        let total = format!("{} Militares", self.personnel.len());

        sheet.set_font(FontStyle::Regular, 9.0);
        sheet.cell(40.0, CELL_HEIGHT, "CMT DA PREVENÇÃO:", true, false, Align::Left, false);
        sheet.cell(0.0, CELL_HEIGHT, &commander_line, true, true, Align::Left, false);
        sheet.cell(20.0, CELL_HEIGHT, "UBM:", true, false, Align::Left, false);
        sheet.cell(30.0, CELL_HEIGHT, self.commander_unit(), true, false, Align::Left, false);
        sheet.cell(35.0, CELL_HEIGHT, "TOTAL EFETIVO:", true, false, Align::Left, false);
        sheet.cell(20.0, CELL_HEIGHT, &total, true, false, Align::Left, false);
        sheet.cell(30.0, CELL_HEIGHT, "DATA:", true, false, Align::Left, false);
        sheet.cell(0.0, CELL_HEIGHT, &self.event.date_display(), true, true, Align::Left, false);
        sheet.cell(40.0, CELL_HEIGHT, "LOCAL:", true, false, Align::Left, false);
        sheet.cell(0.0, CELL_HEIGHT, &self.event.location, true, true, Align::Left, false);
        sheet.cell(40.0, CELL_HEIGHT, "HORÁRIO:", true, false, Align::Left, false);
        sheet.cell(0.0, CELL_HEIGHT, &self.event.time_range_display(), true, true, Align::Left, false);
        sheet.cell(40.0, CELL_HEIGHT, "REFERÊNCIA:", true, false, Align::Left, false);
        sheet.cell(0.0, CELL_HEIGHT, &self.event.reference_display(), true, true, Align::Left, false);
        sheet.ln(5.0);
    }

    fn personnel_table(&self, sheet: &mut SheetBuilder) {
        sheet.set_font(FontStyle::Bold, 10.0);
        sheet.cell(0.0, CELL_HEIGHT, SECTION_PERSONNEL, true, true, Align::Left, true);

        sheet.set_font(FontStyle::Bold, 8.0);
        sheet.cell(COL_SEQUENCE, CELL_HEIGHT, "ORD", true, false, Align::Center, false);
        sheet.cell(COL_RANK, CELL_HEIGHT, "POSTO/GRAD", true, false, Align::Center, false);
        sheet.cell(COL_NAME, CELL_HEIGHT, "NOME COMPLETO", true, false, Align::Center, false);
        sheet.cell(COL_UNIT, CELL_HEIGHT, "UBM", true, false, Align::Center, false);
        sheet.cell(COL_IDENTIFIER, CELL_HEIGHT, "MATRÍCULA", true, true, Align::Center, false);

        sheet.set_font(FontStyle::Regular, 8.0);
        for (index, person) in self.personnel.iter().enumerate() {
            let name = truncate(&person.record.full_name, NAME_MAX_CHARS);
            sheet.cell(COL_SEQUENCE, CELL_HEIGHT, &(index + 1).to_string(), true, false, Align::Center, false);
            sheet.cell(COL_RANK, CELL_HEIGHT, &person.rank, true, false, Align::Center, false);
            sheet.cell(COL_NAME, CELL_HEIGHT, &name, true, false, Align::Left, false);
            sheet.cell(COL_UNIT, CELL_HEIGHT, &person.unit, true, false, Align::Center, false);
            sheet.cell(COL_IDENTIFIER, CELL_HEIGHT, &person.record.identifier, true, true, Align::Center, false);
        }
        sheet.ln(10.0);
    }

    fn signature_block(&self, sheet: &mut SheetBuilder) {
        let dated_city = format!("{}, {}", SIGNATURE_CITY, long_date(self.signed_on));
        let rank_line = format!("{} - {}", self.commander_rank(), COMMANDER_SUFFIX);

        sheet.set_font(FontStyle::Regular, 10.0);
        sheet.cell(0.0, 5.0, &dated_city, false, true, Align::Center, false);
        sheet.ln(15.0);
        sheet.set_font(FontStyle::Bold, 10.0);
        sheet.cell(0.0, 5.0, SIGNATURE_RULE, false, true, Align::Center, false);
        sheet.cell(0.0, 5.0, self.commander_name(), false, true, Align::Center, false);
        sheet.cell(0.0, 5.0, &rank_line, false, true, Align::Center, false);
    }

    fn commander_name(&self) -> &str {
        self.commander.map_or("", |c| c.name.as_str())
    }

    fn commander_rank(&self) -> &str {
        self.commander.map_or("", |c| c.rank.as_str())
    }

    fn commander_unit(&self) -> &str {
        self.commander.map_or("", |c| c.unit.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonnelRecord;
    use chrono::{NaiveDate, NaiveTime};

    fn event() -> EventMetadata {
        EventMetadata {
            order_number: "084/2025".to_string(),
            bulletin_number: "187/2024".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            location: "Capela São José".to_string(),
            start_time: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }

    fn commander() -> CommanderInfo {
        CommanderInfo {
            name: "João Pedro Nogueira".to_string(),
            rank: "2º TEN QOBM".to_string(),
            unit: "QCG".to_string(),
        }
    }

    fn squad(n: usize) -> Vec<AssignedPerson> {
        (1..=n)
            .map(|i| {
                AssignedPerson::from_record(PersonnelRecord::new(
                    format!("Militar Número {}", i),
                    format!("{:06}", i),
                ))
            })
            .collect()
    }

    fn pages(
        commander: Option<&CommanderInfo>,
        event: &EventMetadata,
        personnel: &[AssignedPerson],
    ) -> Vec<PageSheet> {
        DutyReport::new(commander, event, personnel)
            .with_logo_path("/nonexistent/brasao.png")
            .signed_on(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
            .pages()
    }

    fn all_texts(pages: &[PageSheet]) -> Vec<&str> {
        pages.iter().flat_map(|p| p.texts()).collect()
    }

    #[test]
    fn test_table_has_one_numbered_row_per_person() {
        let event = event();
        let personnel = squad(7);
        let pages = pages(None, &event, &personnel);
        let texts = all_texts(&pages);

        for i in 1..=7 {
            assert!(texts.contains(&i.to_string().as_str()));
            assert!(texts.contains(&format!("Militar Número {}", i).as_str()));
            assert!(texts.contains(&format!("{:06}", i).as_str()));
        }
        assert!(!texts.contains(&"8"));
        assert!(texts.contains(&"7 Militares"));
    }

    #[test]
    fn test_rows_keep_input_order() {
        let event = event();
        let personnel = vec![
            AssignedPerson::from_record(PersonnelRecord::new("Zuleide Costa", "9")),
            AssignedPerson::from_record(PersonnelRecord::new("Abel Martins", "1")),
        ];
        let pages = pages(None, &event, &personnel);
        let texts = all_texts(&pages);

        let zuleide = texts.iter().position(|t| *t == "Zuleide Costa").unwrap();
        let abel = texts.iter().position(|t| *t == "Abel Martins").unwrap();
        assert!(zuleide < abel);
    }

    #[test]
    fn test_long_names_truncated_to_45_characters() {
        let long_name = "Francisco das Chagas Albuquerque de Oliveira Nascimento";
        assert!(long_name.chars().count() > NAME_MAX_CHARS);

        let event = event();
        let personnel = vec![AssignedPerson::from_record(PersonnelRecord::new(long_name, "1"))];
        let pages = pages(None, &event, &personnel);
        let texts = all_texts(&pages);

        let expected: String = long_name.chars().take(NAME_MAX_CHARS).collect();
        assert!(texts.contains(&expected.as_str()));
        assert!(!texts.contains(&long_name));
    }

    #[test]
    fn test_empty_personnel_list_renders_without_rows() {
        let event = event();
        let pages = pages(Some(&commander()), &event, &[]);
        assert_eq!(pages.len(), 1);

        let texts = all_texts(&pages);
        assert!(texts.contains(&SECTION_PERSONNEL));
        assert!(texts.contains(&"ORD"));
        assert!(texts.contains(&"0 Militares"));
        // No sequence numbers below the column header.
        assert!(!texts.contains(&"1"));
    }

    #[test]
    fn test_absent_commander_renders_empty_fields() {
        let event = event();
        let personnel = squad(1);
        let pages = pages(None, &event, &personnel);
        let texts = all_texts(&pages);

        // "{rank} {name}" collapses to a single space, and the signature
        // rank line keeps only the suffix.
        assert!(texts.contains(&" "));
        assert!(texts.contains(&format!(" - {}", COMMANDER_SUFFIX).as_str()));
    }

    #[test]
    fn test_initial_data_fields_present() {
        let event = event();
        let personnel = squad(2);
        let pages = pages(Some(&commander()), &event, &personnel);
        let texts = all_texts(&pages);

        assert!(texts.contains(&TITLE));
        assert!(texts.contains(&SECTION_INITIAL_DATA));
        assert!(texts.contains(&"2º TEN QOBM João Pedro Nogueira"));
        assert!(texts.contains(&"QCG"));
        assert!(texts.contains(&"09/03/2025"));
        assert!(texts.contains(&"Capela São José"));
        assert!(texts.contains(&"Das 07h30 às 17h00"));
        assert!(texts.contains(&"NS Nº 084/2025 - BG Nº 187/2024"));
    }

    #[test]
    fn test_signature_block_uses_generation_date() {
        let event = event();
        let personnel = squad(1);
        let pages = pages(Some(&commander()), &event, &personnel);
        let texts = all_texts(&pages);

        assert!(texts.contains(&"Belém-PA, 10 de março de 2025"));
        assert!(texts.contains(&"João Pedro Nogueira"));
        assert!(texts.contains(&format!("2º TEN QOBM - {}", COMMANDER_SUFFIX).as_str()));
    }

    #[test]
    fn test_large_squad_paginates_with_repeated_header_and_footers() {
        let event = event();
        let personnel = squad(60);
        let pages = pages(Some(&commander()), &event, &personnel);
        assert!(pages.len() >= 2);

        let total = pages.len();
        for (i, page) in pages.iter().enumerate() {
            for line in ORGANIZATION_LINES {
                assert!(page.contains_text(line), "header missing on page {}", i + 1);
            }
            assert!(page.contains_text(&format!("Página {}/{}", i + 1, total)));
        }
        // The document title appears on the first page only.
        assert!(pages[0].contains_text(TITLE));
        assert!(!pages[1].contains_text(TITLE));

        // All 60 rows survive pagination.
        let texts = all_texts(&pages);
        assert!(texts.contains(&"60"));
        assert!(texts.contains(&"Militar Número 60"));
    }

    #[test]
    fn test_render_emits_pdf_bytes() {
        let event = event();
        let commander = commander();
        let personnel = squad(3);
        let report = DutyReport::new(Some(&commander), &event, &personnel)
            .with_logo_path("/nonexistent/brasao.png");

        let bytes = report.render().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
    }
}
