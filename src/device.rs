export![camera, capture, device, draw, environment, geometry, instance, light, material];
