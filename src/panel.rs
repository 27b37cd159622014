use crate::constants::*;
use crate::controls::PanelCommand;
use crate::dom;
use crate::frame::SharedLoop;
use trashworld_core::GalaxyParam;
use web_sys as web;

/// Wire every tagged `<input>` on the page to the scene loop. `input` events
/// edit live; `change` (the user let go) regenerates the galaxy once.
pub fn wire_panel(document: &web::Document, scene_loop: &SharedLoop) {
    let groups = [
        ("galaxy", GALAXY_INPUT_ATTR),
        ("flag", FLAG_INPUT_ATTR),
        ("light", LIGHT_INPUT_ATTR),
        ("water", WATER_INPUT_ATTR),
    ];
    let mut wired = 0usize;
    for (group, attr) in groups {
        for (key, el) in dom::inputs_with_attr(document, attr) {
            if group == "galaxy" {
                publish_range(&el, &key, scene_loop);
            }
            let on_input = scene_loop.clone();
            let input_key = key.clone();
            dom::add_input_listener(&el, "input", move |el| {
                match PanelCommand::parse(group, &input_key, &el.value()) {
                    Some(cmd) => cmd.apply(&mut *on_input.borrow_mut()),
                    None => log::warn!("[panel] ignoring {group}.{input_key}={}", el.value()),
                }
            });
            let on_change = scene_loop.clone();
            dom::add_input_listener(&el, "change", move |el| {
                let Some(cmd) = PanelCommand::parse(group, &key, &el.value()) else {
                    return;
                };
                if cmd.commits_galaxy() {
                    // Rejections are logged by the loop; the draft stays for the next try.
                    _ = on_change.borrow_mut().commit_galaxy_edit();
                }
            });
            wired += 1;
        }
    }
    log::info!("[panel] wired {} controls", wired);
}

/// Offer the accepted range and show the current value.
fn publish_range(el: &web::HtmlInputElement, key: &str, scene_loop: &SharedLoop) {
    let Some(param) = GalaxyParam::from_key(key) else {
        return;
    };
    let range = param.range();
    el.set_min(&range.min.to_string());
    el.set_max(&range.max.to_string());
    el.set_step(&range.step.to_string());
    el.set_value(&scene_loop.borrow().galaxy_draft().get(param).to_string());
}
