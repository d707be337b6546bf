//! # Advisory Tasks
//!
//! Soil card analysis, leaf check, crop price prediction and the price screen's
//! district detection.

use std::sync::Arc;

use async_channel::Sender;
use chrono::Local;
use lib_core::ai::advisory::price_history;
use lib_core::location::detect_district as locate_district;
use lib_utils::time::month_name;
use parking_lot::RwLock;

use super::deliver;
use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::debug::spawn_tracked;

/// Send the picked soil card for analysis.
pub(crate) fn analyze_soil(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let job = {
        let mut state = state.write();
        let locale = state.locale();
        let soil = &mut state.soil;
        match soil.input.clone() {
            Some(input) if !soil.loading => {
                soil.loading = true;
                soil.result = None;
                soil.error = None;
                Some((input, locale, soil.gate.issue()))
            }
            _ => None,
        }
    };
    let Some((input, locale, ticket)) = job else {
        return;
    };
    let services = state.read().services.clone();

    spawn_tracked("soil_analysis", async move {
        let report = services.advisory.analyze_soil(input, locale).await.into_inner();
        deliver(
            &event_tx,
            AppEvent::SoilAnalyzed {
                generation: ticket.generation,
                report,
            },
        )
        .await;
    });
}

/// Send the picked leaf photo for diagnosis.
pub(crate) fn check_leaf(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let job = {
        let mut state = state.write();
        let locale = state.locale();
        let leaf = &mut state.leaf;
        match leaf.image.clone() {
            Some(image) if !leaf.loading => {
                leaf.loading = true;
                leaf.result = None;
                leaf.error = None;
                Some((image, locale, leaf.gate.issue()))
            }
            _ => None,
        }
    };
    let Some((image, locale, ticket)) = job else {
        return;
    };
    let services = state.read().services.clone();

    spawn_tracked("leaf_check", async move {
        let result = services
            .advisory
            .check_leaf(image.b64, &image.mime_type, locale)
            .await
            .into_inner();
        deliver(
            &event_tx,
            AppEvent::LeafChecked {
                generation: ticket.generation,
                result,
            },
        )
        .await;
    });
}

/// Predict the price for the selected crop and district.
///
/// Does nothing until both are filled in.
pub(crate) fn predict_price(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let job = {
        let mut state = state.write();
        let price = &mut state.price;
        let crop = price.crop.trim().to_string();
        let district = price.district.trim().to_string();
        if crop.is_empty() || district.is_empty() || price.loading {
            None
        } else {
            price.loading = true;
            price.prediction = None;
            price.history.clear();
            Some((crop, district, price.gate.issue()))
        }
    };
    let Some((crop, district, ticket)) = job else {
        return;
    };
    let services = state.read().services.clone();

    spawn_tracked("price_prediction", async move {
        let today = Local::now().date_naive();
        let prediction = services
            .advisory
            .predict_price(&crop, &district, &month_name(today))
            .await
            .into_inner();
        let history = price_history(prediction.current_price, today, &mut rand::rng());

        deliver(
            &event_tx,
            AppEvent::PricePredicted {
                generation: ticket.generation,
                prediction,
                history,
            },
        )
        .await;
    });
}

/// Fill the district field from the farmer's position.
pub(crate) fn detect_district(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let job = {
        let mut state = state.write();
        let enabled = state.location_enabled();
        if state.price.detecting {
            None
        } else {
            state.price.detecting = true;
            Some((state.services.clone(), enabled, state.price.detect_gate.issue()))
        }
    };
    let Some((services, enabled, ticket)) = job else {
        return;
    };

    spawn_tracked("detect_district", async move {
        let result = locate_district(services.locator.as_ref(), services.geocoder.as_ref(), enabled)
            .await
            .map_err(|e| e.user_message());
        deliver(
            &event_tx,
            AppEvent::DistrictDetected {
                generation: ticket.generation,
                result,
            },
        )
        .await;
    });
}
