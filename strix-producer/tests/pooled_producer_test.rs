//! Behavioral tests for pooled producer handles sharing one resource.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use strix_core::{DeliveryMode, Destination, Error, Message, Priority};
use strix_producer::{CoreProducer, Dispatch, PooledProducer, Producer, ProducerConfig, Transport};

/// Transport that records every dispatch and flags overlapping transmits.
#[derive(Clone, Default)]
struct RecordingTransport {
    dispatches: Arc<Mutex<Vec<Dispatch>>>,
    in_flight: Arc<AtomicUsize>,
    overlap_seen: Arc<AtomicBool>,
    delay: Duration,
}

impl Transport for RecordingTransport {
    fn transmit(&mut self, dispatch: Dispatch) -> strix_core::Result<()> {
        if self.in_flight.fetch_add(1, Ordering::SeqCst) != 0 {
            self.overlap_seen.store(true, Ordering::SeqCst);
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.dispatches.lock().push(dispatch);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

struct FailingTransport;

impl Transport for FailingTransport {
    fn transmit(&mut self, _dispatch: Dispatch) -> strix_core::Result<()> {
        Err(Error::Transport { message: "broker unreachable".to_string() })
    }
}

fn queue(name: &str) -> Destination {
    Destination::queue(name).unwrap()
}

fn shared_resource(transport: RecordingTransport) -> Arc<CoreProducer> {
    Arc::new(CoreProducer::new(queue("q1"), ProducerConfig::default(), Box::new(transport)))
}

#[test]
fn convenience_send_uses_current_cached_configuration() {
    let transport = RecordingTransport::default();
    let dispatches = Arc::clone(&transport.dispatches);
    let resource = shared_resource(transport);

    // Resource defaults: PERSISTENT, priority 4, ttl 0, destination q1.
    let mut producer = PooledProducer::new(resource, queue("q1")).unwrap();
    producer.set_priority(Priority::new(7).unwrap());

    let message = Message::new("payload");
    producer.send(&message).unwrap();

    let recorded = dispatches.lock();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].destination, queue("q1"));
    assert_eq!(recorded[0].delivery_mode, DeliveryMode::Persistent);
    assert_eq!(recorded[0].priority.value(), 7);
    assert_eq!(recorded[0].time_to_live, Duration::ZERO);
    assert_eq!(recorded[0].message_id, Some(message.id));
}

#[test]
fn explicit_send_overrides_without_mutating_cached_state() {
    let transport = RecordingTransport::default();
    let dispatches = Arc::clone(&transport.dispatches);
    let resource = shared_resource(transport);

    let mut producer = PooledProducer::new(resource, queue("q1")).unwrap();
    producer.set_priority(Priority::new(7).unwrap());

    producer
        .send_full(
            Some(&queue("q2")),
            &Message::new("payload"),
            DeliveryMode::NonPersistent,
            Priority::new(1).unwrap(),
            Duration::from_millis(5000),
        )
        .unwrap();

    {
        let recorded = dispatches.lock();
        assert_eq!(recorded[0].destination, queue("q2"));
        assert_eq!(recorded[0].delivery_mode, DeliveryMode::NonPersistent);
        assert_eq!(recorded[0].priority.value(), 1);
        assert_eq!(recorded[0].time_to_live, Duration::from_millis(5000));
    }

    // The explicit call left the cached configuration alone.
    assert_eq!(producer.priority().value(), 7);
    assert_eq!(producer.delivery_mode(), DeliveryMode::Persistent);
    assert_eq!(producer.time_to_live(), Duration::ZERO);
}

#[test]
fn send_with_overrides_parameters_but_keeps_default_destination() {
    let transport = RecordingTransport::default();
    let dispatches = Arc::clone(&transport.dispatches);
    let resource = shared_resource(transport);

    let producer = PooledProducer::new(resource, queue("q1")).unwrap();
    producer
        .send_with(
            &Message::new("payload"),
            DeliveryMode::NonPersistent,
            Priority::MAX,
            Duration::from_secs(1),
        )
        .unwrap();

    let recorded = dispatches.lock();
    assert_eq!(recorded[0].destination, queue("q1"));
    assert_eq!(recorded[0].delivery_mode, DeliveryMode::NonPersistent);
    assert_eq!(recorded[0].priority, Priority::MAX);

    // Cached configuration is untouched.
    assert_eq!(producer.priority(), Priority::DEFAULT);
}

#[test]
fn send_to_uses_the_supplied_destination_verbatim() {
    let transport = RecordingTransport::default();
    let dispatches = Arc::clone(&transport.dispatches);
    let resource = shared_resource(transport);

    let producer = PooledProducer::new(resource, queue("q1")).unwrap();
    producer.send_to(&queue("q2"), &Message::new("payload")).unwrap();

    assert_eq!(dispatches.lock()[0].destination, queue("q2"));
}

#[test]
fn sibling_wrappers_do_not_observe_each_others_overrides() {
    let transport = RecordingTransport::default();
    let dispatches = Arc::clone(&transport.dispatches);
    let resource = shared_resource(transport);

    let mut first = PooledProducer::new(Arc::clone(&resource), queue("q1")).unwrap();
    first.set_delivery_mode(DeliveryMode::NonPersistent);
    first.set_time_to_live(Duration::from_secs(9));

    let second = PooledProducer::new(Arc::clone(&resource), queue("q1")).unwrap();
    assert_eq!(second.delivery_mode(), DeliveryMode::Persistent);
    assert_eq!(second.time_to_live(), Duration::ZERO);

    second.send(&Message::new("payload")).unwrap();
    assert_eq!(dispatches.lock()[0].delivery_mode, DeliveryMode::Persistent);
}

#[test]
fn closing_one_wrapper_leaves_siblings_working() {
    let transport = RecordingTransport::default();
    let resource = shared_resource(transport);

    let mut first = PooledProducer::new(Arc::clone(&resource), queue("q1")).unwrap();
    let second = PooledProducer::new(Arc::clone(&resource), queue("q1")).unwrap();

    first.close().unwrap();

    assert!(!resource.is_closed());
    assert!(second.send(&Message::new("payload")).is_ok());
}

#[test]
fn transmit_failures_propagate_verbatim() {
    let resource = Arc::new(CoreProducer::new(
        queue("q1"),
        ProducerConfig::default(),
        Box::new(FailingTransport),
    ));
    let producer = PooledProducer::new(resource, queue("q1")).unwrap();

    let result = producer.send(&Message::new("payload"));
    assert_eq!(result, Err(Error::Transport { message: "broker unreachable".to_string() }));
}

#[test]
fn invalidated_resource_surfaces_as_resource_closed() {
    let transport = RecordingTransport::default();
    let resource = shared_resource(transport);
    let producer = PooledProducer::new(Arc::clone(&resource), queue("q1")).unwrap();

    resource.invalidate();

    assert_eq!(producer.send(&Message::new("payload")), Err(Error::ResourceClosed));
}

#[test]
fn concurrent_sends_through_one_resource_never_overlap() {
    const SENDERS: usize = 8;

    let transport =
        RecordingTransport { delay: Duration::from_millis(5), ..RecordingTransport::default() };
    let dispatches = Arc::clone(&transport.dispatches);
    let overlap_seen = Arc::clone(&transport.overlap_seen);
    let resource = shared_resource(transport);

    let mut handles = Vec::new();
    for i in 0..SENDERS {
        let resource = Arc::clone(&resource);
        handles.push(thread::spawn(move || {
            // Each sender gets its own wrapper, destination, and priority so
            // parameter mixing between interleaved calls would be visible.
            let destination = queue(&format!("q{i}"));
            let priority = Priority::new(u8::try_from(i).unwrap() % 10).unwrap();
            let mut producer =
                PooledProducer::new(resource, destination.clone()).unwrap();
            producer.set_priority(priority);
            producer.send(&Message::new(format!("payload-{i}"))).unwrap();
            (destination, priority)
        }));
    }

    let sent: Vec<(Destination, Priority)> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(!overlap_seen.load(Ordering::SeqCst), "two transmits overlapped");

    let recorded = dispatches.lock();
    assert_eq!(recorded.len(), SENDERS);
    for dispatch in recorded.iter() {
        // Every recorded dispatch carries one sender's parameters intact.
        assert!(sent
            .iter()
            .any(|(d, p)| *d == dispatch.destination && *p == dispatch.priority));
    }
}

#[test]
fn handles_are_interchangeable_behind_the_producer_trait() {
    let transport = RecordingTransport::default();
    let dispatches = Arc::clone(&transport.dispatches);
    let resource = shared_resource(transport.clone());

    let pooled = PooledProducer::new(Arc::clone(&resource), queue("q1")).unwrap();
    let direct = CoreProducer::new(queue("q1"), ProducerConfig::default(), Box::new(transport));

    let producers: Vec<Box<dyn Producer>> = vec![Box::new(pooled), Box::new(direct)];
    for producer in &producers {
        producer.send(&Message::new("payload")).unwrap();
        assert_eq!(producer.destination(), &queue("q1"));
    }

    assert_eq!(dispatches.lock().len(), 2);
}
