//! Embedded fallback dataset.
//!
//! When the configured dataset cannot be loaded (missing file, unreachable
//! host, malformed JSON) the loader substitutes this collection so the tool
//! stays usable offline. The substitution is always surfaced as a degraded
//! notice; see `data::source::load_or_fallback`.

use crate::domain::{Complexity, Country, Region};

/// The ten-country collection shipped with the tool.
pub fn embedded_countries() -> Vec<Country> {
    vec![
        country(
            "US",
            "United States",
            "🇺🇸",
            Region::Americas,
            Complexity::Medium,
            "80-120",
            12,
            &[
                "Backup Withholding (24%)",
                "FATCA",
                "Form 1099 Reporting",
            ],
            "US withholding tax system includes backup withholding for missing TINs, \
             Form 1099 reporting for domestic contractors, and Form 1042-S for foreign \
             persons. Treaty benefits available for qualified non-residents.",
            &[
                "Certificate management (W-9, W-8BEN, W-8BEN-E)",
                "Annual 1099 and 1042-S filing requirements",
                "State-level withholding variations",
                "FATCA compliance for foreign accounts",
            ],
        ),
        country(
            "IN",
            "India",
            "🇮🇳",
            Region::Apj,
            Complexity::High,
            "120-160",
            15,
            &[
                "TDS Section 194J (10%)",
                "TDS Section 194C (1-2%)",
                "TDS Section 195 (20%)",
            ],
            "India Tax Deducted at Source (TDS) system is highly complex with multiple \
             sections for different payment types. Requires quarterly filing via TRACES \
             portal with Form 26Q and 27Q.",
            &[
                "Multiple TDS sections with varying rates",
                "Form 15CA/CB for foreign payments",
                "Lower deduction certificates (Form 197)",
                "Quarterly TDS return filing (26Q, 27Q, 24Q)",
                "PAN validation requirements",
            ],
        ),
        country(
            "BR",
            "Brazil",
            "🇧🇷",
            Region::Latam,
            Complexity::High,
            "120-160",
            8,
            &[
                "IRRF - Income Tax (0.75-27.5%)",
                "ISS - Service Tax (2-5%)",
                "PIS/COFINS (9.25%)",
            ],
            "Brazilian withholding system includes IRRF on various income types and ISS \
             municipal service tax. Complex regulatory environment with frequent changes.",
            &[
                "Multiple federal and municipal taxes",
                "DIRF annual declaration requirement",
                "Electronic invoicing (NF-e, NFS-e) integration",
                "SPED fiscal reporting",
                "eSocial compliance",
            ],
        ),
        country(
            "GB",
            "United Kingdom",
            "🇬🇧",
            Region::Emea,
            Complexity::Low,
            "60-80",
            10,
            &[
                "CIS - Construction Industry Scheme (20/30%)",
                "Interest Withholding (20%)",
            ],
            "UK CIS for construction contractors and standard withholding on interest \
             payments. Relatively straightforward with good HMRC systems integration.",
            &[
                "CIS registration and gross payment status",
                "Monthly CIS returns to HMRC",
                "UTR (Unique Taxpayer Reference) validation",
                "Real-time reporting requirements",
            ],
        ),
        country(
            "DE",
            "Germany",
            "🇩🇪",
            Region::Emea,
            Complexity::Medium,
            "80-120",
            7,
            &[
                "Withholding Tax on Services (0-25%)",
                "Investment Income Tax (25%)",
            ],
            "German withholding applies to certain service types and investment income. \
             Exemption certificates (Freistellungsbescheinigung) reduce administrative \
             burden.",
            &[
                "Certificate of residence for treaty benefits",
                "Exemption certificate management",
                "Annual tax certificate (Steuerbescheinigung)",
                "Electronic filing requirements",
            ],
        ),
        country(
            "CN",
            "China",
            "🇨🇳",
            Region::Apj,
            Complexity::High,
            "120-160",
            6,
            &[
                "Business Tax (5-6%)",
                "VAT (6-17%)",
                "Income Tax (10-25%)",
            ],
            "Chinese withholding system complex with VAT and business tax considerations. \
             Fapiao (official invoices) critical for compliance.",
            &[
                "Fapiao invoice requirements",
                "Multiple tax types and rates",
                "Local tax bureau registration",
                "Tax treaty documentation",
                "Monthly tax filing requirements",
            ],
        ),
        country(
            "FR",
            "France",
            "🇫🇷",
            Region::Emea,
            Complexity::Medium,
            "80-120",
            5,
            &[
                "Withholding Tax on Services (0-33.33%)",
                "Prélèvement à la Source",
            ],
            "French withholding system modernized with Prélèvement à la Source. Treaty \
             benefits available for non-residents with proper documentation.",
            &[
                "Certificate of residence requirements",
                "Annual tax declaration (2561)",
                "Electronic filing via EDI",
                "Treaty benefit documentation",
            ],
        ),
        country(
            "CA",
            "Canada",
            "🇨🇦",
            Region::Americas,
            Complexity::Low,
            "60-80",
            9,
            &[
                "Non-Resident Withholding (25%)",
                "Part XIII Tax",
            ],
            "Canadian non-resident withholding straightforward with standard 25% rate, \
             reduced by treaty. Good CRA online services.",
            &[
                "Treaty benefit applications",
                "NR4 information return",
                "Waiver applications for exemptions",
                "Provincial tax considerations",
            ],
        ),
        country(
            "AU",
            "Australia",
            "🇦🇺",
            Region::Apj,
            Complexity::Low,
            "60-80",
            8,
            &[
                "PAYG Withholding (47%)",
                "WHT on Services (5-30%)",
            ],
            "Australian withholding system with PAYG for contractors and specific rates \
             for non-residents. Well-structured ATO guidance.",
            &[
                "ABN (Australian Business Number) validation",
                "TFN declaration forms",
                "Annual PAYG payment summary",
                "Activity statement reporting",
            ],
        ),
        country(
            "MX",
            "Mexico",
            "🇲🇽",
            Region::Latam,
            Complexity::Medium,
            "80-120",
            6,
            &[
                "ISR - Income Tax (10-30%)",
                "IVA - VAT (16%)",
                "Retention Rates",
            ],
            "Mexican retention system includes ISR and IVA with monthly filing \
             requirements. CFDI electronic invoicing mandatory.",
            &[
                "RFC (tax ID) validation",
                "CFDI electronic invoice compliance",
                "Monthly provisional payments",
                "Annual declaration requirements",
                "SAT portal integration",
            ],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn country(
    code: &str,
    name: &str,
    flag: &str,
    region: Region,
    complexity: Complexity,
    hours: &str,
    implementations: u32,
    tax_types: &[&str],
    overview: &str,
    considerations: &[&str],
) -> Country {
    Country {
        code: code.to_string(),
        name: name.to_string(),
        flag: flag.to_string(),
        region,
        complexity,
        hours: hours.to_string(),
        implementations,
        tax_types: tax_types.iter().map(|s| s.to_string()).collect(),
        overview: overview.to_string(),
        considerations: considerations.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn embedded_collection_is_nonempty_with_unique_keys() {
        let countries = embedded_countries();
        assert_eq!(countries.len(), 10);

        let codes: HashSet<_> = countries.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes.len(), countries.len());

        let names: HashSet<_> = countries.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names.len(), countries.len());
    }

    #[test]
    fn embedded_records_are_fully_populated() {
        for country in embedded_countries() {
            assert!(!country.code.is_empty());
            assert!(!country.name.is_empty());
            assert!(!country.hours.is_empty());
            assert!(!country.tax_types.is_empty(), "{} has no tax types", country.code);
            assert!(!country.overview.is_empty());
            assert!(!country.considerations.is_empty());
        }
    }
}
