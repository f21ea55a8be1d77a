use crate::error::UpstreamError;
use crate::runtime::archive::read_first_entry;
use crate::types::CorpEntry;
use quick_xml::events::Event;
use quick_xml::Reader;

pub const ENDPOINT: &str = "corpCode.xml";

#[derive(Clone, Copy)]
enum Field {
    CorpCode,
    CorpName,
    StockCode,
    ModifyDate,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"corp_code" => Some(Field::CorpCode),
            b"corp_name" => Some(Field::CorpName),
            b"stock_code" => Some(Field::StockCode),
            b"modify_date" => Some(Field::ModifyDate),
            _ => None,
        }
    }

    fn slot<'a>(self, entry: &'a mut CorpEntry) -> &'a mut String {
        match self {
            Field::CorpCode => &mut entry.corp_code,
            Field::CorpName => &mut entry.corp_name,
            Field::StockCode => &mut entry.stock_code,
            Field::ModifyDate => &mut entry.modify_date,
        }
    }
}

fn invalid(reason: String) -> UpstreamError {
    UpstreamError::InvalidResponse {
        endpoint: ENDPOINT.to_string(),
        reason,
    }
}

/// Streams the corporation listing and returns the first `<list>` record whose
/// `corp_name` equals `company_name` exactly.
pub fn find_corp(xml: &str, company_name: &str) -> Result<Option<CorpEntry>, UpstreamError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut current: Option<CorpEntry> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                if name.as_ref() == b"list" {
                    current = Some(CorpEntry::default());
                } else if current.is_some() {
                    field = Field::from_tag(name.as_ref());
                }
            }
            Ok(Event::Text(ref e)) => {
                if let (Some(entry), Some(field)) = (current.as_mut(), field) {
                    let text = e.unescape().map_err(|err| invalid(err.to_string()))?;
                    field.slot(entry).push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"list" {
                    if let Some(entry) = current.take() {
                        if entry.corp_name == company_name {
                            return Ok(Some(entry));
                        }
                    }
                }
                field = None;
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => {
                return Err(invalid(format!(
                    "XML error at byte {}: {e}",
                    reader.error_position()
                )))
            }
            _ => {}
        }
    }
}

/// Unpacks the `corpCode.xml` archive and looks up `company_name`.
pub fn find_corp_in_archive(
    archive: &[u8],
    company_name: &str,
) -> Result<CorpEntry, UpstreamError> {
    let entry = read_first_entry(archive)?;
    let xml = std::str::from_utf8(&entry.bytes)
        .map_err(|e| invalid(format!("{} is not UTF-8: {e}", entry.name)))?;

    let corp = find_corp(xml, company_name)?
        .ok_or_else(|| UpstreamError::CompanyNotFound(company_name.to_string()))?;
    tracing::info!(
        "[dart] resolved {} to corp_code {}",
        corp.corp_name,
        corp.corp_code
    );
    Ok(corp)
}
