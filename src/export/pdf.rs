use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A4 portrait, used for report tables.
const PORTRAIT: (f32, f32) = (595.0, 842.0);
/// A4 landscape, used for certificates.
const LANDSCAPE: (f32, f32) = (842.0, 595.0);

/// Helvetica average glyph width as a fraction of the font size.
const AVG_GLYPH: f32 = 0.52;

/// Everything printed on one certificate page.
#[derive(Debug, Clone)]
pub struct CertificateData {
    pub organisation: String,
    pub participant: String,
    pub event_title: String,
    pub date_span: String,
    pub place: String,
    pub conductor: Option<String>,
    pub issued_on: String,
}

/// Glyphs WinAnsi places in 0x80..=0x9F, where Latin-1 has control codes.
const WIN_ANSI_HIGH: [(char, u8); 27] = [
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// Encode text for the WinAnsi-encoded base fonts. Characters without a
/// WinAnsi glyph become `?`.
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            0x80..=0x9F => b'?',
            cp @ 0..=0xFF => cp as u8,
            _ => WIN_ANSI_HIGH
                .iter()
                .find(|(ch, _)| *ch == c)
                .map_or(b'?', |&(_, byte)| byte),
        })
        .collect()
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * AVG_GLYPH
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,
    bold_font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);
        let next_id = 5;

        pdf.type1_font(font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_font_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            margin: 50.0,
            row_h: 20.0,

            next_id,
            font_id,
            bold_font_id,

            font_size: 10.0,
            header_font_size: 11.0,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Start a page of the given size; returns its content stream.
    fn new_page(&mut self, (w, h): (f32, f32)) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, w, h))
            .contents(content_id);

        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(Name(b"F1"), self.font_id);
        fonts.pair(Name(b"F2"), self.bold_font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, bold: bool, text: &str) {
        let font = if bold { Name(b"F2") } else { Name(b"F1") };
        let bytes = win_ansi(text);
        content.begin_text();
        content.set_font(font, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    fn draw_centered(&self, content: &mut Content, page_w: f32, y: f32, size: f32, bold: bool, text: &str) {
        let x = ((page_w - text_width(text, size)) / 2.0).max(self.margin);
        self.draw_text(content, x, y, size, bold, text);
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        row: &[String],
        font_size: f32,
        bold: bool,
    ) {
        let mut x = self.margin;

        for (i, text) in row.iter().enumerate() {
            let w = col_widths[i];
            let max_chars = ((w - 8.0) / (font_size * AVG_GLYPH)).max(1.0) as usize;
            let shown: String = if text.chars().count() > max_chars {
                let mut s: String = text.chars().take(max_chars.saturating_sub(1)).collect();
                s.push('.');
                s
            } else {
                text.clone()
            };
            self.draw_text(content, x + 4.0, y + 6.0, font_size, bold, &shown);
            self.draw_cell_borders(content, x, y, w, self.row_h);
            x += w;
        }
    }

    /// Column widths from header + content, scaled down to fit the page.
    fn compute_col_widths(&self, headers: &[String], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.5 + 8.0).collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = (cell.chars().count() as f32 * 5.6 + 8.0).max(widths[i]);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = PORTRAIT.0 - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_page_header_footer(&self, content: &mut Content, title: &str, page: usize) {
        let (w, h) = PORTRAIT;
        self.draw_text(
            content,
            self.margin,
            h - self.margin + 15.0,
            self.title_font_size,
            true,
            title,
        );

        let pg = format!("Page {}", page);
        self.draw_text(
            content,
            w - self.margin - 60.0,
            self.margin - 35.0,
            self.font_size,
            false,
            &pg,
        );
    }

    fn draw_table_header(&self, content: &mut Content, y: f32, col_widths: &[f32], headers: &[String]) {
        content.save_state();
        content.set_fill_rgb(0.85, 0.87, 0.90);
        content.rect(self.margin, y, col_widths.iter().sum(), self.row_h);
        content.fill_nonzero();
        content.restore_state();

        self.draw_row(content, y, col_widths, headers, self.header_font_size, true);
    }

    /// Multi-page table with a title on each page. An empty table still
    /// yields one page with the header row.
    pub fn write_table(&mut self, title: &str, headers: &[String], rows: &[Vec<String>]) {
        let col_widths = self.compute_col_widths(headers, rows);
        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        loop {
            let mut content = self.new_page(PORTRAIT);
            self.draw_page_header_footer(&mut content, title, page_idx);

            let mut y = PORTRAIT.1 - self.margin - 30.0;
            self.draw_table_header(&mut content, y, &col_widths, headers);
            y -= self.row_h;

            let mut consumed = 0;

            for (i, row) in remaining.iter().enumerate() {
                if y - self.row_h < self.margin {
                    break;
                }

                // zebra stripe
                if i % 2 == 0 {
                    content.save_state();
                    content.set_fill_rgb(0.96, 0.96, 0.96);
                    content.rect(self.margin, y, col_widths.iter().sum(), self.row_h);
                    content.fill_nonzero();
                    content.restore_state();
                }

                self.draw_row(&mut content, y, &col_widths, row, self.font_size, false);

                y -= self.row_h;
                consumed += 1;
            }

            self.finalize_page(content);
            remaining = &remaining[consumed..];
            page_idx += 1;

            if remaining.is_empty() {
                break;
            }
        }
    }

    /// One landscape certificate page.
    pub fn write_certificate(&mut self, data: &CertificateData) {
        let (w, h) = LANDSCAPE;
        let mut content = self.new_page(LANDSCAPE);

        // double frame
        content.save_state();
        content.set_stroke_rgb(0.18, 0.46, 0.71);
        content.set_line_width(3.0);
        content.rect(25.0, 25.0, w - 50.0, h - 50.0);
        content.stroke();
        content.set_line_width(1.0);
        content.rect(35.0, 35.0, w - 70.0, h - 70.0);
        content.stroke();
        content.restore_state();

        self.draw_centered(&mut content, w, h - 95.0, 16.0, false, &data.organisation.to_uppercase());
        self.draw_centered(&mut content, w, h - 150.0, 34.0, true, "Certificate of Participation");
        self.draw_centered(&mut content, w, h - 205.0, 14.0, false, "This certifies that");
        self.draw_centered(&mut content, w, h - 250.0, 30.0, true, &data.participant);
        self.draw_centered(&mut content, w, h - 292.0, 14.0, false, "took part in");

        let mut y = h - 328.0;
        for line in textwrap::wrap(&data.event_title, 48) {
            self.draw_centered(&mut content, w, y, 20.0, true, &line);
            y -= 26.0;
        }

        let when_where = if data.place.is_empty() {
            data.date_span.clone()
        } else {
            format!("{}  |  {}", data.date_span, data.place)
        };
        self.draw_centered(&mut content, w, y - 6.0, 13.0, false, &when_where);

        // signature line
        let line_y = 110.0;
        content.save_state();
        content.set_stroke_rgb(0.3, 0.3, 0.3);
        content.move_to(w - 300.0, line_y);
        content.line_to(w - 90.0, line_y);
        content.stroke();
        content.restore_state();

        if let Some(conductor) = &data.conductor {
            self.draw_text(&mut content, w - 300.0, line_y - 18.0, 12.0, true, conductor);
        }
        self.draw_text(&mut content, w - 300.0, line_y - 34.0, 10.0, false, "Facilitator");

        self.draw_text(
            &mut content,
            90.0,
            line_y - 18.0,
            11.0,
            false,
            &format!("Issued on {}", data.issued_on),
        );

        self.finalize_page(content);
    }

    /// Finish the document and return its bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();
        self.pdf.finish()
    }

    pub fn save(self, path: &Path) -> std::io::Result<()> {
        let bytes = self.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}
