use crate::constants::MESSAGE_ID;
use card_core::{MESSAGE_PARAGRAPHS, MESSAGE_QUOTE, MESSAGE_TITLE};
use web_sys as web;

fn append(document: &web::Document, parent: &web::Element, tag: &str, text: &str) -> anyhow::Result<()> {
    let el = document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    el.set_text_content(Some(text));
    parent
        .append_child(&el)
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    Ok(())
}

pub fn render(document: &web::Document) -> anyhow::Result<()> {
    let Some(card) = document.get_element_by_id(MESSAGE_ID) else {
        return Ok(());
    };
    card.set_text_content(None);
    append(document, &card, "h2", MESSAGE_TITLE)?;
    for paragraph in MESSAGE_PARAGRAPHS {
        append(document, &card, "p", paragraph)?;
    }
    append(document, &card, "blockquote", MESSAGE_QUOTE)
}
