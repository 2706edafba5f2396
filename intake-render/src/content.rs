//! The format-neutral content tree every emitter walks.
//!
//! [`build_document`] decides what appears and in what order: which
//! conditional sections are included, how values are formatted, where
//! placeholders go. Emitters only lay the tree out.

use crate::error::{RenderError, RenderResult};
use crate::format::{display_scalar, format_money};
use crate::pdf::ReportFont;
use chrono::{DateTime, Utc};
use intake_types::{
    breakdown_key, experience_level_key, experience_year_key, keys, objective_key, purpose_key,
    FieldValue, FormDataSet, NestedRecord, BREAKDOWN_ASSETS, EXPERIENCE_ASSETS,
    INVESTMENT_OBJECTIVES, INVESTMENT_PURPOSES,
};

/// Default document title.
pub const DEFAULT_TITLE: &str = "Client Intake Form";

/// Default text for absent or empty values.
pub const DEFAULT_PLACEHOLDER: &str = "[Not provided]";

/// Keys rendered as money.
pub const MONEY_KEYS: &[&str] = &[
    keys::ANNUAL_INCOME,
    keys::NET_WORTH,
    keys::LIQUID_NET_WORTH,
    keys::ASSETS_HELD_AWAY,
    keys::OUTSIDE_LIQUID_AMOUNT,
];

/// Rendering options shared by all emitters.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub title: String,
    pub placeholder: String,
    /// Stamped into the report metadata and title block when set. Leaving
    /// it unset makes every output byte-for-byte reproducible.
    pub generated_at: Option<DateTime<Utc>>,
    /// Embedded in the report for text outside WinAnsi (CJK, Greek,
    /// Cyrillic). Without one such characters print as `?`.
    pub font: Option<ReportFont>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            generated_at: None,
            font: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub generated_at: Option<DateTime<Utc>>,
    pub sections: Vec<Section>,
}

impl Document {
    /// Looks a section up by heading.
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub heading: String,
    pub blocks: Vec<Block>,
}

impl Section {
    fn new(heading: &str) -> Self {
        Self {
            heading: heading.to_string(),
            blocks: Vec::new(),
        }
    }

    /// Value of the first field with `label`.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Field { label: l, value } if l == label => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// `label: value` line.
    Field { label: String, value: String },
    /// Bold caption introducing the blocks that follow.
    Subheading(String),
    Table(Table),
    /// Free-standing sentence such as "No dependents specified".
    Notice(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Noun used when a row is listed on its own ("Dependent 1"). Without
    /// one the first cell names the row.
    pub row_label: Option<String>,
}

/// Builds the content tree for `data`.
///
/// Fails with [`RenderError::UnexpectedShape`] when a scalar field holds a
/// list or object, or a repeating group holds anything but records.
pub fn build_document(data: &FormDataSet, opts: &RenderOptions) -> RenderResult<Document> {
    let b = Builder { data, opts };
    let mut sections = vec![b.personal()?, b.contact()?, b.employment()?];

    if data.text(keys::EMPLOYMENT_STATUS).trim() == "Retired" {
        sections.push(b.retirement()?);
    }
    sections.push(b.financial()?);
    if data.flag(keys::SPOUSE_APPLICABLE) {
        sections.push(b.spouse()?);
    }
    sections.push(b.dependents()?);
    sections.push(b.beneficiaries()?);
    if data.flag(keys::INCLUDE_BREAKDOWN) {
        sections.push(b.breakdown()?);
    }
    sections.push(b.experience()?);
    if data.flag(keys::HAS_OUTSIDE_BROKER) {
        sections.push(b.outside_broker()?);
    }
    if !data.is_blank(keys::TRUSTED_FULL_NAME) {
        sections.push(b.trusted_contact()?);
    }
    sections.push(b.regulatory());

    Ok(Document {
        title: opts.title.clone(),
        generated_at: opts.generated_at,
        sections,
    })
}

struct Builder<'a> {
    data: &'a FormDataSet,
    opts: &'a RenderOptions,
}

impl Builder<'_> {
    fn or_placeholder(&self, text: String) -> String {
        if text.trim().is_empty() {
            self.opts.placeholder.clone()
        } else {
            text
        }
    }

    /// Display text of a scalar field, money-formatted where applicable.
    fn scalar(&self, key: &str) -> RenderResult<String> {
        let Some(value) = self.data.get(key) else {
            return Ok(self.opts.placeholder.clone());
        };
        if !value.is_scalar() {
            return Err(RenderError::UnexpectedShape {
                key: key.to_string(),
                expected: "a single value",
            });
        }
        if value.is_blank() {
            return Ok(self.opts.placeholder.clone());
        }
        if MONEY_KEYS.contains(&key) {
            return Ok(format_money(value));
        }
        Ok(display_scalar(value))
    }

    fn fields(&self, heading: &str, rows: &[(&str, &str)]) -> RenderResult<Section> {
        let mut section = Section::new(heading);
        for (label, key) in rows {
            self.push_field(&mut section, label, key)?;
        }
        Ok(section)
    }

    fn push_field(&self, section: &mut Section, label: &str, key: &str) -> RenderResult<()> {
        section.blocks.push(Block::Field {
            label: label.to_string(),
            value: self.scalar(key)?,
        });
        Ok(())
    }

    fn records(&self, key: &str) -> RenderResult<&[NestedRecord]> {
        match self.data.get(key) {
            Some(FieldValue::Records(records)) => Ok(records),
            None => Ok(&[]),
            Some(v @ FieldValue::Other(_)) if v.is_blank() => Ok(&[]),
            Some(_) => Err(RenderError::UnexpectedShape {
                key: key.to_string(),
                expected: "a list of records",
            }),
        }
    }

    fn cell(
        &self,
        group: &str,
        index: usize,
        record: &NestedRecord,
        field: &str,
    ) -> RenderResult<String> {
        match record.get(field) {
            None => Ok(self.opts.placeholder.clone()),
            Some(v) if !v.is_scalar() => Err(RenderError::UnexpectedShape {
                key: format!("{group}[{index}].{field}"),
                expected: "a single value",
            }),
            Some(v) => Ok(self.or_placeholder(display_scalar(v))),
        }
    }

    fn group_table(
        &self,
        key: &str,
        heading: &str,
        row_label: &str,
        empty_notice: &str,
        columns: &[(&str, &str)],
    ) -> RenderResult<Section> {
        let mut section = Section::new(heading);
        let records = self.records(key)?;
        if records.is_empty() {
            section.blocks.push(Block::Notice(empty_notice.to_string()));
            return Ok(section);
        }

        let mut rows = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let mut row = Vec::with_capacity(columns.len());
            for (_, field) in columns {
                let mut text = self.cell(key, i, record, field)?;
                if *field == keys::RECORD_PERCENTAGE && text != self.opts.placeholder {
                    text.push('%');
                }
                row.push(text);
            }
            rows.push(row);
        }
        section.blocks.push(Block::Table(Table {
            columns: columns.iter().map(|(c, _)| c.to_string()).collect(),
            rows,
            row_label: Some(row_label.to_string()),
        }));
        Ok(section)
    }

    fn personal(&self) -> RenderResult<Section> {
        self.fields(
            "Personal Information",
            &[
                ("Full Name", keys::FULL_NAME),
                ("Date of Birth", keys::DOB),
                ("Social Security Number", keys::SSN),
                ("Citizenship", keys::CITIZENSHIP),
                ("Marital Status", keys::MARITAL_STATUS),
            ],
        )
    }

    fn contact(&self) -> RenderResult<Section> {
        let mut section = Section::new("Contact Information");
        self.push_field(&mut section, "Residential Address", keys::RESIDENTIAL_ADDRESS)?;
        if self.data.flag(keys::MAILING_ADDRESS_DIFFERENT) {
            self.push_field(&mut section, "Mailing Address", keys::MAILING_ADDRESS)?;
        }
        for (label, key) in [
            ("Email Address", keys::EMAIL),
            ("Home Phone", keys::HOME_PHONE),
            ("Work Phone", keys::WORK_PHONE),
            ("Mobile Phone", keys::MOBILE_PHONE),
        ] {
            self.push_field(&mut section, label, key)?;
        }
        Ok(section)
    }

    fn employment(&self) -> RenderResult<Section> {
        self.fields(
            "Employment Information",
            &[
                ("Employment Status", keys::EMPLOYMENT_STATUS),
                ("Employer Name", keys::EMPLOYER_NAME),
                ("Occupation/Title", keys::OCCUPATION),
                ("Years Employed", keys::YEARS_EMPLOYED),
                ("Annual Income", keys::ANNUAL_INCOME),
                ("Employer Address", keys::EMPLOYER_ADDRESS),
            ],
        )
    }

    fn retirement(&self) -> RenderResult<Section> {
        self.fields(
            "Retirement Information",
            &[
                ("Former Employer", keys::FORMER_EMPLOYER),
                ("Source of Income", keys::INCOME_SOURCE),
            ],
        )
    }

    fn financial(&self) -> RenderResult<Section> {
        let mut section = self.fields(
            "Financial Information",
            &[
                ("Education Status", keys::EDUCATION_STATUS),
                ("Estimated Tax Bracket", keys::TAX_BRACKET),
                ("Investment Risk Tolerance", keys::RISK_TOLERANCE),
            ],
        )?;

        let purposes: Vec<&str> = INVESTMENT_PURPOSES
            .iter()
            .filter(|p| self.data.flag(&purpose_key(p.slug)))
            .map(|p| p.label)
            .collect();
        section.blocks.push(Block::Field {
            label: "Investment Purpose".to_string(),
            value: self.or_placeholder(purposes.join(", ")),
        });

        section
            .blocks
            .push(Block::Subheading("Investment Objectives (Ranked 1-5)".to_string()));
        for objective in INVESTMENT_OBJECTIVES {
            self.push_field(&mut section, objective.label, &objective_key(objective.slug))?;
        }

        for (label, key) in [
            ("Net Worth (excluding primary home)", keys::NET_WORTH),
            ("Liquid Net Worth", keys::LIQUID_NET_WORTH),
            ("Assets Held Away", keys::ASSETS_HELD_AWAY),
        ] {
            self.push_field(&mut section, label, key)?;
        }
        Ok(section)
    }

    fn spouse(&self) -> RenderResult<Section> {
        self.fields(
            "Spouse/Partner Information",
            &[
                ("Spouse Full Name", keys::SPOUSE_FULL_NAME),
                ("Spouse Date of Birth", keys::SPOUSE_DOB),
                ("Spouse SSN", keys::SPOUSE_SSN),
                ("Spouse Employment Status", keys::SPOUSE_EMPLOYMENT_STATUS),
                ("Spouse Employer Name", keys::SPOUSE_EMPLOYER_NAME),
                ("Spouse Occupation/Title", keys::SPOUSE_OCCUPATION),
            ],
        )
    }

    fn dependents(&self) -> RenderResult<Section> {
        self.group_table(
            keys::DEPENDENTS,
            "Dependents",
            "Dependent",
            "No dependents specified",
            &[
                ("Name", keys::RECORD_NAME),
                ("Date of Birth", keys::RECORD_DOB),
                ("Relationship", keys::RECORD_RELATIONSHIP),
            ],
        )
    }

    fn beneficiaries(&self) -> RenderResult<Section> {
        self.group_table(
            keys::BENEFICIARIES,
            "Beneficiaries",
            "Beneficiary",
            "No beneficiaries specified",
            &[
                ("Name", keys::RECORD_NAME),
                ("Date of Birth", keys::RECORD_DOB),
                ("Relationship", keys::RECORD_RELATIONSHIP),
                ("Percentage", keys::RECORD_PERCENTAGE),
            ],
        )
    }

    fn breakdown(&self) -> RenderResult<Section> {
        let mut section = Section::new("Asset Breakdown");
        for asset in BREAKDOWN_ASSETS {
            let key = breakdown_key(asset.slug);
            let mut value = self.scalar(&key)?;
            if value != self.opts.placeholder {
                value.push('%');
            }
            section.blocks.push(Block::Field {
                label: asset.label.to_string(),
                value,
            });
        }
        Ok(section)
    }

    fn experience(&self) -> RenderResult<Section> {
        let mut section = Section::new("Investment Experience");
        let mut rows = Vec::with_capacity(EXPERIENCE_ASSETS.len());
        for asset in EXPERIENCE_ASSETS {
            rows.push(vec![
                asset.label.to_string(),
                self.scalar(&experience_year_key(asset.slug))?,
                self.scalar(&experience_level_key(asset.slug))?,
            ]);
        }
        section.blocks.push(Block::Table(Table {
            columns: vec![
                "Asset Type".to_string(),
                "Year Started".to_string(),
                "Experience Level".to_string(),
            ],
            rows,
            row_label: None,
        }));
        Ok(section)
    }

    fn outside_broker(&self) -> RenderResult<Section> {
        self.fields(
            "Outside Broker Information",
            &[
                ("Broker Firm Name", keys::OUTSIDE_FIRM_NAME),
                ("Account Type", keys::OUTSIDE_ACCOUNT_TYPE),
                ("Account Number", keys::OUTSIDE_ACCOUNT_NUMBER),
                ("Liquid Amount", keys::OUTSIDE_LIQUID_AMOUNT),
            ],
        )
    }

    fn trusted_contact(&self) -> RenderResult<Section> {
        self.fields(
            "Trusted Contact Information",
            &[
                ("Full Name", keys::TRUSTED_FULL_NAME),
                ("Relationship", keys::TRUSTED_RELATIONSHIP),
                ("Phone Number", keys::TRUSTED_PHONE),
                ("Email Address", keys::TRUSTED_EMAIL),
            ],
        )
    }

    fn regulatory(&self) -> Section {
        let consent = if self.data.flag(keys::ELECTRONIC_REGULATORY_YES) {
            "Yes"
        } else {
            "No"
        };
        let mut section = Section::new("Regulatory Consent");
        section.blocks.push(Block::Field {
            label: "Electronic Delivery Consent".to_string(),
            value: consent.to_string(),
        });
        section
    }
}
