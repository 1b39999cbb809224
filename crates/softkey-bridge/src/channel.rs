//! Emission-to-channel-message rendering.
//!
//! One emission becomes exactly one outbound message. Transition starts
//! (`keyboardOpening`, `keyboardClosing`) carry no arguments; every
//! measurement-bearing emission carries `height` and `bottomPadding` in
//! device-independent units.

use serde_json::{Value, json};
use softkey_core::{Emission, EmissionSink};

/// One outbound host method-channel invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMessage {
    /// Host-visible method name.
    pub method: &'static str,
    /// JSON arguments, `None` for payload-less methods.
    pub arguments: Option<Value>,
}

/// Render an emission into its channel message.
pub fn message_for(emission: &Emission) -> ChannelMessage {
    ChannelMessage {
        method: emission.method_name(),
        arguments: emission.metrics().map(|metrics| {
            json!({
                "height": metrics.height_units,
                "bottomPadding": metrics.bottom_padding_units,
            })
        }),
    }
}

/// Sink that renders every emission and hands the message to the host
/// transport. Fire-and-forget: the transport closure gets no way to report
/// back into the engine.
pub struct ChannelSink<F: FnMut(ChannelMessage)> {
    transport: F,
}

impl<F: FnMut(ChannelMessage)> ChannelSink<F> {
    /// Wrap a host transport closure.
    pub fn new(transport: F) -> Self {
        Self { transport }
    }
}

impl<F: FnMut(ChannelMessage)> EmissionSink for ChannelSink<F> {
    fn deliver(&mut self, emission: &Emission) {
        (self.transport)(message_for(emission));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use softkey_core::KeyboardMetrics;

    #[test]
    fn test_transition_starts_have_no_arguments() {
        assert_eq!(
            message_for(&Emission::Opening),
            ChannelMessage {
                method: "keyboardOpening",
                arguments: None,
            }
        );
        assert_eq!(message_for(&Emission::Closing).arguments, None);
    }

    #[test]
    fn test_measurement_emissions_carry_payload_fields() {
        let metrics = KeyboardMetrics::new(302.0, 34.0);

        let message = message_for(&Emission::Opened { metrics });
        assert_eq!(message.method, "keyboardOpened");
        let args = message.arguments.unwrap();
        assert_eq!(args["height"], 302.0);
        assert_eq!(args["bottomPadding"], 34.0);

        let message = message_for(&Emission::Progress { metrics });
        assert_eq!(message.method, "onProgress");
        assert!(message.arguments.is_some());

        let message = message_for(&Emission::MetricsUpdate { metrics });
        assert_eq!(message.method, "metricsUpdate");
    }

    #[test]
    fn test_closed_always_reports_zero_height() {
        let message = message_for(&Emission::Closed {
            metrics: KeyboardMetrics::new(0.0, 34.0),
        });
        assert_eq!(message.method, "keyboardClosed");
        assert_eq!(message.arguments.unwrap()["height"], 0.0);
    }

    #[test]
    fn test_channel_sink_forwards_in_order() {
        let mut messages = Vec::new();
        {
            let mut sink = ChannelSink::new(|message| messages.push(message));
            sink.deliver(&Emission::Opening);
            sink.deliver(&Emission::Opened {
                metrics: KeyboardMetrics::new(300.0, 0.0),
            });
        }

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].method, "keyboardOpening");
        assert_eq!(messages[1].method, "keyboardOpened");
    }
}
